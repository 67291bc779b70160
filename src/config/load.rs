use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `ENCORE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ENCORE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let v = self.audio.initial_volume;
        if !(0.0..=1.0).contains(&v) {
            return Err(format!("audio.initial_volume must be within [0, 1], got {v}"));
        }
        if self.audio.poll_interval_ms == 0 {
            return Err("audio.poll_interval_ms must be >= 1".to_string());
        }
        let step = self.controls.volume_step;
        if !(step > 0.0 && step <= 1.0) {
            return Err(format!("controls.volume_step must be within (0, 1], got {step}"));
        }
        if !(self.controls.reset_threshold_seconds >= 0.0) {
            return Err("controls.reset_threshold_seconds must be >= 0".to_string());
        }

        let c = &self.carousel;
        if !(c.swipe_threshold_px > 0.0) {
            return Err("carousel.swipe_threshold_px must be > 0".to_string());
        }
        if !(c.cell_width_px > 0.0) {
            return Err("carousel.cell_width_px must be > 0".to_string());
        }
        if !(c.medium_min_width_px < c.large_min_width_px) {
            return Err(
                "carousel.medium_min_width_px must be below carousel.large_min_width_px"
                    .to_string(),
            );
        }
        if c.videos_per_page == 0 {
            return Err("carousel.videos_per_page must be >= 1".to_string());
        }

        if !(1..=50).contains(&self.videos.max_results) {
            return Err("videos.max_results must be within 1..=50".to_string());
        }
        if self.ui.visualizer_bars == 0 {
            return Err("ui.visualizer_bars must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `ENCORE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ENCORE_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/encore/config.toml`
/// or `~/.config/encore/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("encore").join("config.toml"))
}
