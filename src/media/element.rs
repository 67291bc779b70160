use crate::error::MediaError;

/// Events observed on the media element, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback position advanced to the given second.
    TimeUpdate(f64),
    /// Duration of the loaded source became known.
    LoadedMetadata(f64),
    /// The source played to its natural end.
    Ended,
    /// The source failed to load or decode.
    Error(String),
    /// The source is buffered well enough to play through.
    CanPlayThrough,
}

/// A single playable element, mutated only by the transport core.
///
/// Loading is fire-and-forget: `set_source` never fails directly, load
/// problems surface later as [`MediaEvent::Error`]. Starting playback can be
/// refused and must be reconciled by the caller; a `play` accepted while the
/// source is still loading takes effect once it is ready.
pub trait MediaElement {
    /// Assign a new source, replacing whatever was loaded.
    fn set_source(&mut self, url: &str);
    /// Start or resume playback of the current source.
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    /// Move the playback position, in seconds.
    fn set_current_time(&mut self, seconds: f64);
    /// Output gain in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    /// Drain the events produced since the last call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
    /// Drop the source and release any output resources.
    fn unload(&mut self);
}
