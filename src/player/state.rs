/// Transport state published to every surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time_seconds: f64,
    /// Zero until the element reports metadata for the loaded source.
    pub duration_seconds: f64,
    /// Stored volume in `[0, 1]`; zero while muted.
    pub volume: f32,
    pub is_muted: bool,
    /// Last non-zero volume, used to come back from mute.
    pub restore_volume: Option<f32>,
    pub last_error: Option<String>,
}

impl PlaybackState {
    pub fn new(volume: f32) -> Self {
        let volume = clamp_volume(volume);
        Self {
            is_playing: false,
            current_time_seconds: 0.0,
            duration_seconds: 0.0,
            volume,
            is_muted: volume == 0.0,
            restore_volume: (volume > 0.0).then_some(volume),
            last_error: None,
        }
    }

    /// Gain actually sent to the element.
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    /// Clamp a position into `[0, duration]`.
    pub fn clamp_time(&self, seconds: f64) -> f64 {
        if !seconds.is_finite() {
            return 0.0;
        }
        seconds.clamp(0.0, self.duration_seconds.max(0.0))
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

pub(crate) fn clamp_volume(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
