//! The media transport core: sole owner and mutator of the media element.
//!
//! Every operation is infallible from the caller's point of view. Element
//! failures are folded into `PlaybackState::last_error` and leave the core
//! paused and ready for another attempt.

use tracing::{debug, info, warn};

use crate::catalog::Track;
use crate::media::{MediaElement, MediaEvent};

use super::queue::PlayQueue;
use super::state::{PlaybackState, clamp_volume};

const PLAY_FAILED: &str = "Unable to play audio. Please try again.";

pub struct Transport {
    element: Box<dyn MediaElement>,
    state: PlaybackState,
    current: Option<Track>,
    queue: PlayQueue,
    dragging: bool,
}

impl Transport {
    /// Take ownership of `element` for the rest of the session.
    pub fn new(mut element: Box<dyn MediaElement>, initial_volume: f32) -> Self {
        let state = PlaybackState::new(initial_volume);
        element.set_volume(state.effective_volume());
        Self {
            element,
            state,
            current: None,
            queue: PlayQueue::new(),
            dragging: false,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_current_track(&self, id: &str) -> bool {
        self.current.as_ref().is_some_and(|t| t.id == id)
    }

    /// Load `track` into the element and start it from the beginning.
    pub fn play(&mut self, track: &Track) {
        let switching = !self.is_current_track(&track.id);
        if switching && self.current.is_some() && self.state.is_playing {
            self.element.pause();
        }
        if switching {
            self.state.duration_seconds = 0.0;
        }

        self.element.set_source(&track.media_url);
        self.current = Some(track.clone());
        self.state.current_time_seconds = 0.0;

        match self.element.play() {
            Ok(()) => {
                self.state.is_playing = true;
                self.state.last_error = None;
                if self.queue.append(track.clone()) {
                    debug!(id = %track.id, queued = self.queue.len(), "track queued");
                }
                info!(id = %track.id, title = %track.title, "playing");
            }
            Err(e) => {
                warn!(id = %track.id, error = %e, "playback start failed");
                self.state.is_playing = false;
                self.state.last_error = Some(PLAY_FAILED.to_string());
            }
        }
    }

    pub fn pause(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.element.pause();
        self.state.is_playing = false;
    }

    /// Pause, or resume the loaded track where it stopped. A track whose last
    /// attempt failed is reloaded from scratch instead.
    pub fn toggle_play(&mut self) {
        let Some(track) = self.current.clone() else {
            return;
        };
        if self.state.is_playing {
            self.pause();
        } else if self.state.last_error.is_some() {
            self.play(&track);
        } else {
            self.resume();
        }
    }

    fn resume(&mut self) {
        match self.element.play() {
            Ok(()) => {
                self.state.is_playing = true;
                self.state.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "resume failed");
                self.state.is_playing = false;
                self.state.last_error = Some(PLAY_FAILED.to_string());
            }
        }
    }

    /// Move to `seconds`, clamped to the known duration. The new position is
    /// published immediately rather than on the element's next tick.
    pub fn seek(&mut self, seconds: f64) {
        let t = self.state.clamp_time(seconds);
        self.element.set_current_time(t);
        self.state.current_time_seconds = t;
    }

    pub fn set_volume(&mut self, volume: f32) {
        let v = clamp_volume(volume);
        self.element.set_volume(v);
        self.state.volume = v;
        self.state.is_muted = v == 0.0;
        if v > 0.0 {
            self.state.restore_volume = Some(v);
        }
    }

    pub fn toggle_mute(&mut self) {
        if self.state.is_muted {
            self.set_volume(self.state.restore_volume.unwrap_or(1.0));
        } else {
            self.element.set_volume(0.0);
            self.state.volume = 0.0;
            self.state.is_muted = true;
        }
    }

    /// Back to the start; keeps playing if it was playing.
    pub fn reset(&mut self) {
        let was_playing = self.state.is_playing;
        self.seek(0.0);
        if was_playing {
            self.resume();
        }
    }

    /// Stop and unload the current track. The queue is kept.
    pub fn close(&mut self) {
        self.element.pause();
        self.element.set_current_time(0.0);
        self.state.current_time_seconds = 0.0;
        self.state.is_playing = false;
        self.state.last_error = None;
        self.current = None;
    }

    /// Manual skip forward through the queue, wrapping to the front.
    pub fn play_next(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        if let Some(next) = self.queue.next(&current.id).cloned() {
            self.play(&next);
        }
    }

    /// Manual skip backward through the queue, wrapping to the back.
    pub fn play_previous(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        if let Some(prev) = self.queue.previous(&current.id).cloned() {
            self.play(&prev);
        }
    }

    pub fn add_to_queue(&mut self, track: &Track) -> bool {
        self.queue.append(track.clone())
    }

    pub fn remove_from_queue(&mut self, id: &str) -> bool {
        self.queue.remove(id)
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// While set, element time updates are ignored so a manual drag is not
    /// overwritten.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Translate one element event into state.
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(t) => {
                if !self.dragging {
                    self.state.current_time_seconds = if self.state.duration_seconds > 0.0 {
                        self.state.clamp_time(t)
                    } else {
                        t.max(0.0)
                    };
                }
            }
            MediaEvent::LoadedMetadata(d) => {
                if d.is_finite() && d >= 0.0 {
                    self.state.duration_seconds = d;
                    self.state.current_time_seconds =
                        self.state.clamp_time(self.state.current_time_seconds);
                }
                self.state.last_error = None;
            }
            MediaEvent::Ended => self.advance(),
            MediaEvent::Error(msg) => {
                warn!(error = %msg, "media element error");
                self.state.last_error = Some(msg);
                self.state.is_playing = false;
            }
            MediaEvent::CanPlayThrough => {
                self.state.last_error = None;
            }
        }
    }

    /// Poll the element and apply whatever it reported. Returns whether any
    /// event arrived.
    pub fn pump(&mut self) -> bool {
        let events = self.element.poll_events();
        let any = !events.is_empty();
        for event in events {
            self.handle_event(event);
        }
        any
    }

    /// Natural end of media: continue with the queue or stop.
    fn advance(&mut self) {
        let next = self
            .current
            .as_ref()
            .and_then(|cur| self.queue.next(&cur.id))
            .cloned();
        match next {
            Some(track) => {
                debug!(id = %track.id, "auto-advancing");
                self.play(&track);
            }
            None => {
                self.element.pause();
                self.state.is_playing = false;
            }
        }
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.element.pause();
        self.element.unload();
    }
}
