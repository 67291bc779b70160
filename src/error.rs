//! Error types shared across the player, catalog and video listing.
//!
//! Transport-level errors never escape the transport core's public
//! operations: they are rendered into `PlaybackState::last_error`. The types
//! here exist so the seams below the core (media element, HTTP, catalog
//! files) can still use `?`.

use thiserror::Error;

/// Failures raised by a [`crate::media::MediaElement`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    /// `play` was attempted before any source was assigned.
    #[error("no media source loaded")]
    NoSource,

    /// The media locator could not be opened (missing file, bad path).
    #[error("unable to open {url}: {reason}")]
    Open { url: String, reason: String },

    /// Bytes were read but could not be decoded.
    #[error("unable to decode {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Remote media could not be downloaded.
    #[error("unable to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The element refused to start (no output device, policy).
    #[error("playback refused: {0}")]
    Refused(String),
}

/// Failures of the third-party video listing call.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("video listing is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing {0}")]
    Missing(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures loading a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate track id {0:?}")]
    DuplicateId(String),
}
