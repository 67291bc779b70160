//! Log setup. The terminal belongs to the UI, so events go to a file.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogSettings;

/// Environment variable overriding `log.filter`.
pub const FILTER_ENV: &str = "ENCORE_LOG";

/// Install the global subscriber and return the file it writes to.
pub fn init(settings: &LogSettings) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = log_path(
        settings.file.as_deref(),
        std::env::var_os("XDG_STATE_HOME"),
        std::env::var_os("HOME"),
    );
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env(FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(path)
}

/// `file` if configured, else `$XDG_STATE_HOME/encore/encore.log`, else
/// `~/.local/state/encore/encore.log`, else the temp directory.
fn log_path(file: Option<&Path>, state_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    if let Some(f) = file {
        return f.to_path_buf();
    }
    let state_dir = state_home
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(".local").join("state")))
        .unwrap_or_else(std::env::temp_dir);
    state_dir.join("encore").join("encore.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_file_wins() {
        let p = log_path(
            Some(Path::new("/var/log/encore.log")),
            Some("/state".into()),
            Some("/home/me".into()),
        );
        assert_eq!(p, PathBuf::from("/var/log/encore.log"));
    }

    #[test]
    fn state_home_then_home() {
        assert_eq!(
            log_path(None, Some("/state".into()), Some("/home/me".into())),
            PathBuf::from("/state/encore/encore.log")
        );
        assert_eq!(
            log_path(None, None, Some("/home/me".into())),
            PathBuf::from("/home/me/.local/state/encore/encore.log")
        );
        assert_eq!(
            log_path(None, None, None),
            std::env::temp_dir().join("encore").join("encore.log")
        );
    }
}
