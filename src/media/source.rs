//! Resolving catalog media locators into bytes `rodio` can decode.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;

use crate::error::MediaError;

/// Where a media URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Locator {
    Local(PathBuf),
    Remote(String),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Local(path) => write!(f, "{}", path.display()),
            Locator::Remote(url) => f.write_str(url),
        }
    }
}

/// Resolve `url` against `media_root`. Site-absolute paths (`/music/a.mp3`)
/// are taken relative to the root.
pub(super) fn resolve(url: &str, media_root: &Path) -> Locator {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        return Locator::Remote(url.to_string());
    }
    let path = url.strip_prefix("file://").unwrap_or(url);
    let p = Path::new(path);
    if path.starts_with('/') && !p.exists() {
        return Locator::Local(media_root.join(path.trim_start_matches('/')));
    }
    if p.is_absolute() {
        Locator::Local(p.to_path_buf())
    } else {
        Locator::Local(media_root.join(p))
    }
}

/// Read the whole source into memory.
pub(super) fn read_bytes(locator: &Locator, agent: &ureq::Agent) -> Result<Vec<u8>, MediaError> {
    match locator {
        Locator::Local(path) => std::fs::read(path).map_err(|e| MediaError::Open {
            url: path.display().to_string(),
            reason: e.to_string(),
        }),
        Locator::Remote(url) => {
            let fetch_err = |reason: String| MediaError::Fetch {
                url: url.clone(),
                reason,
            };
            let resp = agent.get(url).call().map_err(|e| fetch_err(e.to_string()))?;
            let mut buf = Vec::new();
            resp.into_reader()
                .read_to_end(&mut buf)
                .map_err(|e| fetch_err(e.to_string()))?;
            Ok(buf)
        }
    }
}

/// Duration from container tags, for local files only.
pub(super) fn tagged_duration(locator: &Locator) -> Option<Duration> {
    match locator {
        Locator::Local(path) => lofty::read_from_path(path)
            .ok()
            .map(|tagged| tagged.properties().duration())
            .filter(|d| !d.is_zero()),
        Locator::Remote(_) => None,
    }
}
