//! A `MediaElement` whose behavior is driven by the test.
//!
//! The element shares its `Script` with the test through an `Rc`, so the test
//! can queue events, refuse the next play, and inspect calls after the
//! element has been moved into the transport core.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::MediaError;

use super::element::{MediaElement, MediaEvent};

#[derive(Debug, Default)]
pub struct Script {
    pub source: Option<String>,
    pub playing: bool,
    pub position: f64,
    pub volume: f32,
    pub unloaded: bool,
    /// Returned by the next `play` call, then cleared.
    pub refuse_next_play: Option<MediaError>,
    /// Handed out by the next `poll_events`.
    pub pending: Vec<MediaEvent>,
    pub calls: Vec<String>,
}

impl Script {
    pub fn emit(&mut self, event: MediaEvent) {
        self.pending.push(event);
    }
}

pub struct ScriptedElement {
    script: Rc<RefCell<Script>>,
}

impl ScriptedElement {
    pub fn new() -> (Self, Rc<RefCell<Script>>) {
        let script = Rc::new(RefCell::new(Script {
            volume: 1.0,
            ..Script::default()
        }));
        (
            Self {
                script: script.clone(),
            },
            script,
        )
    }
}

impl MediaElement for ScriptedElement {
    fn set_source(&mut self, url: &str) {
        let mut s = self.script.borrow_mut();
        s.calls.push(format!("source {url}"));
        s.source = Some(url.to_string());
        s.playing = false;
        s.position = 0.0;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let mut s = self.script.borrow_mut();
        s.calls.push("play".into());
        if let Some(err) = s.refuse_next_play.take() {
            s.playing = false;
            return Err(err);
        }
        if s.source.is_none() {
            return Err(MediaError::NoSource);
        }
        s.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut s = self.script.borrow_mut();
        s.calls.push("pause".into());
        s.playing = false;
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut s = self.script.borrow_mut();
        s.calls.push(format!("seek {seconds}"));
        s.position = seconds;
    }

    fn set_volume(&mut self, volume: f32) {
        let mut s = self.script.borrow_mut();
        s.calls.push(format!("volume {volume}"));
        s.volume = volume;
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.script.borrow_mut().pending)
    }

    fn unload(&mut self) {
        let mut s = self.script.borrow_mut();
        s.calls.push("unload".into());
        s.source = None;
        s.playing = false;
        s.unloaded = true;
    }
}
