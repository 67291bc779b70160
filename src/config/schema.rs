use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub carousel: CarouselSettings,
    pub catalog: CatalogSettings,
    pub videos: VideoSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume the session starts with, in `[0, 1]`.
    pub initial_volume: f32,
    /// How often the media element is polled for progress (milliseconds).
    pub poll_interval_ms: u64,
    /// Timeout for downloading remote media (seconds).
    pub fetch_timeout_secs: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            poll_interval_ms: 50,
            fetch_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change per `+` / `-` press.
    pub volume_step: f32,
    /// Reset stays disabled until playback passes this many seconds.
    pub reset_threshold_seconds: f64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.05,
            reset_threshold_seconds: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    /// Horizontal travel that turns a drag or wheel into a page change.
    pub swipe_threshold_px: f64,
    /// Pixels represented by one terminal column.
    pub cell_width_px: f64,
    /// Pixels represented by one horizontal wheel notch.
    pub wheel_step_px: f64,
    /// Viewports at least this wide show two cards per page.
    pub medium_min_width_px: f64,
    /// Viewports at least this wide show three cards per page.
    pub large_min_width_px: f64,
    pub videos_per_page: usize,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50.0,
            cell_width_px: 8.0,
            wheel_step_px: 64.0,
            medium_min_width_px: 640.0,
            large_min_width_px: 1024.0,
            videos_per_page: 6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Optional TOML catalog replacing the built-in one.
    pub path: Option<PathBuf>,
    /// Directory media paths are resolved against.
    pub media_root: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: None,
            media_root: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    pub enabled: bool,
    pub channel_id: String,
    pub api_key: String,
    pub base_url: String,
    /// Page size of the playlist request (the API caps this at 50).
    pub max_results: u32,
    /// Extra attempts after a failed request.
    pub retries: u32,
    /// First retry delay; doubles on each attempt.
    pub backoff_ms: u64,
    pub timeout_secs: u64,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            channel_id: String::new(),
            api_key: String::new(),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            max_results: 50,
            retries: 2,
            backoff_ms: 500,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Number of bars in the full player visualizer.
    pub visualizer_bars: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ encore ~ ".to_string(),
            visualizer_bars: 40,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file; defaults to `$XDG_STATE_HOME/encore/encore.log`.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive, overridden by `ENCORE_LOG`.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
