use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::error::MediaError;

use super::element::{MediaElement, MediaEvent};
use super::loader::{self, LoadOutcome};
use super::source;

/// `MediaElement` backed by a single `rodio` sink on the default output.
///
/// Sources load on a worker thread; the outcome is reported through
/// `poll_events`. The whole source is held in memory so a finished sink can
/// be rebuilt for seeks and replays without touching the disk or network
/// again.
pub struct RodioElement {
    stream: Option<OutputStream>,
    agent: ureq::Agent,
    media_root: PathBuf,
    url: Option<String>,
    bytes: Option<Arc<[u8]>>,
    sink: Option<Sink>,
    /// Outcome of the load started by the last `set_source`.
    loading: Option<mpsc::Receiver<LoadOutcome>>,
    /// `play` arrived while the source was still loading.
    play_requested: bool,
    /// Seek target recorded while loading.
    start_at: Duration,
    volume: f32,
    ended: bool,
    pending: Vec<MediaEvent>,
}

impl RodioElement {
    pub fn new(media_root: PathBuf, fetch_timeout: Duration) -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio prints to stderr on drop, which tears the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                warn!(error = %e, "no audio output device; playback will be refused");
                None
            }
        };

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(fetch_timeout)
            .timeout_read(fetch_timeout)
            .redirects(10)
            .build();

        Self {
            stream,
            agent,
            media_root,
            url: None,
            bytes: None,
            sink: None,
            loading: None,
            play_requested: false,
            start_at: Duration::ZERO,
            volume: 1.0,
            ended: false,
            pending: Vec::new(),
        }
    }

    fn decode(&self, bytes: Arc<[u8]>) -> Result<Decoder<Cursor<Arc<[u8]>>>, MediaError> {
        Decoder::new(Cursor::new(bytes)).map_err(|e| MediaError::Decode {
            url: self.url.clone().unwrap_or_default(),
            reason: e.to_string(),
        })
    }

    /// Build a paused sink for the loaded bytes positioned at `start_at`.
    fn rebuild_sink(&mut self, start_at: Duration) -> Result<(), MediaError> {
        let bytes = self.bytes.clone().ok_or(MediaError::NoSource)?;
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| MediaError::Refused("no audio output device".into()))?;
        let decoder = self.decode(bytes)?;

        let sink = Sink::connect_new(stream.mixer());
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(decoder);
        if !start_at.is_zero() {
            if let Err(e) = sink.try_seek(start_at) {
                debug!(error = %e, "seek on rebuilt sink failed");
            }
        }

        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.ended = false;
        Ok(())
    }

    /// Pick up a finished load: build the sink, start it if `play` was
    /// requested meanwhile, and report the outcome as events.
    fn poll_loader(&mut self) {
        let Some(rx) = self.loading.as_ref() else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => Err(MediaError::Fetch {
                url: self.url.clone().unwrap_or_default(),
                reason: "loader stopped".into(),
            }),
        };
        self.loading = None;
        let play = std::mem::take(&mut self.play_requested);

        let loaded = match outcome {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "media source failed to load");
                self.pending.push(MediaEvent::Error(e.to_string()));
                return;
            }
        };
        self.bytes = Some(loaded.bytes);
        if let Some(d) = loaded.duration {
            self.pending.push(MediaEvent::LoadedMetadata(d.as_secs_f64()));
        }

        let start_at = std::mem::take(&mut self.start_at);
        match self.rebuild_sink(start_at) {
            Ok(()) => {
                self.pending.push(MediaEvent::CanPlayThrough);
                if play {
                    if let Some(sink) = self.sink.as_ref() {
                        sink.play();
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "media source cannot play");
                self.pending.push(MediaEvent::Error(e.to_string()));
            }
        }
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

impl MediaElement for RodioElement {
    fn set_source(&mut self, url: &str) {
        self.stop_sink();
        self.url = Some(url.to_string());
        self.bytes = None;
        self.ended = false;
        self.play_requested = false;
        self.start_at = Duration::ZERO;

        let locator = source::resolve(url, &self.media_root);
        debug!(?locator, "loading media source");
        // Replacing the receiver drops any load still in flight.
        self.loading = Some(loader::spawn(locator, self.agent.clone()));
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if self.loading.is_some() {
            self.play_requested = true;
            return Ok(());
        }
        if self.bytes.is_none() {
            return Err(MediaError::NoSource);
        }
        if self.sink.is_none() || self.ended {
            self.rebuild_sink(Duration::ZERO)?;
        }
        match self.sink.as_ref() {
            Some(sink) => {
                sink.play();
                Ok(())
            }
            None => Err(MediaError::Refused("no audio output device".into())),
        }
    }

    fn pause(&mut self) {
        self.play_requested = false;
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        let target = if seconds.is_finite() && seconds > 0.0 {
            Duration::from_secs_f64(seconds)
        } else {
            Duration::ZERO
        };
        if self.loading.is_some() {
            self.start_at = target;
            return;
        }
        if self.bytes.is_none() {
            return;
        }

        if self.ended || self.sink.is_none() {
            if let Err(e) = self.rebuild_sink(target) {
                debug!(error = %e, "unable to rebuild sink for seek");
            }
            return;
        }
        if let Some(sink) = self.sink.as_ref() {
            if let Err(e) = sink.try_seek(target) {
                debug!(error = %e, "seek failed");
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(volume);
        }
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.poll_loader();
        if let Some(sink) = self.sink.as_ref() {
            if !sink.is_paused() && !self.ended {
                if sink.empty() {
                    self.ended = true;
                    self.pending.push(MediaEvent::Ended);
                } else {
                    self.pending
                        .push(MediaEvent::TimeUpdate(sink.get_pos().as_secs_f64()));
                }
            }
        }
        std::mem::take(&mut self.pending)
    }

    fn unload(&mut self) {
        self.stop_sink();
        self.loading = None;
        self.play_requested = false;
        self.start_at = Duration::ZERO;
        self.url = None;
        self.bytes = None;
        self.ended = false;
        self.pending.clear();
    }
}

impl Drop for RodioElement {
    fn drop(&mut self) {
        self.stop_sink();
    }
}
