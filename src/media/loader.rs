//! Off-thread loading of media sources.
//!
//! Reading a remote source can take as long as the fetch timeout, so the
//! bytes are read, test-decoded and measured on a worker thread.
//! The element polls the receiver from its event pump.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rodio::{Decoder, Source};
use tracing::{debug, warn};

use crate::error::MediaError;

use super::source::{self, Locator};

/// A source that was read and decodes.
#[derive(Debug)]
pub(super) struct Loaded {
    pub bytes: Arc<[u8]>,
    pub duration: Option<Duration>,
}

pub(super) type LoadOutcome = Result<Loaded, MediaError>;

/// Start loading `locator`. The receiver yields exactly one outcome; dropping
/// it discards a load that is no longer wanted.
pub(super) fn spawn(locator: Locator, agent: ureq::Agent) -> mpsc::Receiver<LoadOutcome> {
    let (tx, rx) = mpsc::channel();
    let fallback = tx.clone();
    let spawned = thread::Builder::new()
        .name("media-load".into())
        .spawn(move || {
            let outcome = load(&locator, &agent);
            if tx.send(outcome).is_err() {
                debug!(?locator, "media load superseded");
            }
        });
    if let Err(e) = spawned {
        warn!(error = %e, "unable to start media loader");
        let _ = fallback.send(Err(MediaError::Refused(format!(
            "unable to start media loader: {e}"
        ))));
    }
    rx
}

/// Read `locator` fully and check that it decodes.
pub(super) fn load(locator: &Locator, agent: &ureq::Agent) -> LoadOutcome {
    let bytes: Arc<[u8]> = source::read_bytes(locator, agent)?.into();
    let decoder = Decoder::new(Cursor::new(bytes.clone())).map_err(|e| MediaError::Decode {
        url: locator.to_string(),
        reason: e.to_string(),
    })?;
    let duration = source::tagged_duration(locator).or_else(|| decoder.total_duration());
    Ok(Loaded { bytes, duration })
}
