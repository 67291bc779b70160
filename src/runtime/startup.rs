use std::sync::mpsc;
use std::thread;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config;
use crate::player::{SharedPlayer, Subscription};
use crate::videos::{self, VideoFeed};

/// The configured catalog file, or the built-in catalog when none is set or
/// it fails to load.
pub fn load_catalog(settings: &config::Settings) -> (Catalog, Option<String>) {
    let (catalog, warning) = read_catalog(settings);
    for t in catalog.get_all() {
        debug!(id = %t.id, kind = ?t.kind, featured = t.featured, "catalog entry");
    }
    (catalog, warning)
}

fn read_catalog(settings: &config::Settings) -> (Catalog, Option<String>) {
    let Some(path) = settings.catalog.path.as_deref() else {
        return (Catalog::builtin(), None);
    };
    match Catalog::load(path) {
        Ok(c) if c.is_empty() => {
            warn!(path = %path.display(), "catalog file lists no tracks; using built-in");
            (
                Catalog::builtin(),
                Some(format!("Catalog {} is empty, showing built-in", path.display())),
            )
        }
        Ok(c) => {
            info!(path = %path.display(), tracks = c.len(), "catalog loaded");
            (c, None)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalog failed to load; using built-in");
            (
                Catalog::builtin(),
                Some(format!("Catalog {} unreadable, showing built-in", path.display())),
            )
        }
    }
}

/// Fetch the video feed off the UI thread. The receiver yields exactly one
/// feed.
pub fn spawn_video_fetch(settings: config::VideoSettings) -> mpsc::Receiver<VideoFeed> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("video-fetch".into())
        .spawn(move || {
            let _ = tx.send(videos::load_feed(&settings));
        });
    if let Err(e) = spawned {
        warn!(error = %e, "unable to start video fetch");
    }
    rx
}

/// Log whenever the loaded track or its error changes.
pub fn log_track_changes(player: &SharedPlayer) -> Subscription {
    let mut last_id: Option<String> = None;
    let mut last_error: Option<String> = None;
    player.subscribe(move |snap| {
        let id = snap.current.as_ref().map(|t| t.id.clone());
        if id != last_id {
            match snap.current.as_ref() {
                Some(t) => info!(id = %t.id, track = %t.display(), "now loaded"),
                None => info!("player closed"),
            }
            last_id = id;
        }
        if snap.state.last_error != last_error {
            if let Some(e) = snap.state.last_error.as_deref() {
                warn!(error = e, "player reported an error");
            }
            last_error = snap.state.last_error.clone();
        }
    })
}
