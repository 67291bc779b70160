//! Shared player state broadcast.
//!
//! `SharedPlayer` is a cheap clonable handle to the one transport core of the
//! session. Commands are applied strictly one at a time; after each one the
//! new snapshot is pushed synchronously to every subscriber. A command
//! dispatched from inside a subscriber is queued and only runs once every
//! subscriber has seen the current snapshot.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::catalog::Track;
use crate::media::MediaElement;

use super::state::PlaybackState;
use super::transport::Transport;

/// Everything a surface may ask the player to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCmd {
    /// Load and start the given track.
    Play(Track),
    Pause,
    TogglePlay,
    /// Seek to an absolute position in seconds.
    Seek(f64),
    SetVolume(f32),
    ToggleMute,
    /// Back to the start, keeping play state.
    Reset,
    /// Stop and forget the current track.
    Close,
    Next,
    Previous,
    AddToQueue(Track),
    RemoveFromQueue(String),
    ClearQueue,
    ToggleMiniPlayer,
    DragStart,
    DragEnd,
    /// Drain element events into state.
    Pump,
}

/// Immutable view of the player handed to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub state: PlaybackState,
    pub current: Option<Track>,
    pub queue: Vec<Track>,
    pub mini_player_visible: bool,
    pub dragging: bool,
}

impl PlayerSnapshot {
    pub fn is_current_track(&self, id: &str) -> bool {
        self.current.as_ref().is_some_and(|t| t.id == id)
    }

    /// The track is loaded and audibly playing.
    pub fn is_playing_track(&self, id: &str) -> bool {
        self.is_current_track(id) && self.state.is_playing
    }
}

type Listener = Box<dyn FnMut(&PlayerSnapshot)>;

struct Inner {
    transport: RefCell<Transport>,
    mini_player_visible: Cell<bool>,
    snapshot: RefCell<PlayerSnapshot>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    removed: RefCell<Vec<u64>>,
    next_listener_id: Cell<u64>,
    pending: RefCell<VecDeque<PlayerCmd>>,
    dispatching: Cell<bool>,
    notifying: Cell<bool>,
}

impl Inner {
    fn take_snapshot(&self) -> PlayerSnapshot {
        let transport = self.transport.borrow();
        PlayerSnapshot {
            state: transport.state().clone(),
            current: transport.current_track().cloned(),
            queue: transport.queue().tracks().to_vec(),
            mini_player_visible: self.mini_player_visible.get(),
            dragging: transport.is_dragging(),
        }
    }

    fn purge_removed(&self) {
        let removed = std::mem::take(&mut *self.removed.borrow_mut());
        if !removed.is_empty() {
            self.listeners
                .borrow_mut()
                .retain(|(id, _)| !removed.contains(id));
        }
    }
}

/// Handle to the session's single player.
#[derive(Clone)]
pub struct SharedPlayer {
    inner: Rc<Inner>,
}

/// Keeps a subscriber registered; dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    inner: Weak<Inner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.removed.borrow_mut().push(self.id);
            if !inner.notifying.get() {
                inner.purge_removed();
            }
        }
    }
}

impl SharedPlayer {
    /// Build the session player around its one media element.
    pub fn new(element: Box<dyn MediaElement>, initial_volume: f32) -> Self {
        let transport = Transport::new(element, initial_volume);
        let inner = Inner {
            transport: RefCell::new(transport),
            mini_player_visible: Cell::new(false),
            snapshot: RefCell::new(PlayerSnapshot {
                state: PlaybackState::new(initial_volume),
                current: None,
                queue: Vec::new(),
                mini_player_visible: false,
                dragging: false,
            }),
            listeners: RefCell::new(Vec::new()),
            removed: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(0),
            pending: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            notifying: Cell::new(false),
        };
        let snapshot = inner.take_snapshot();
        *inner.snapshot.borrow_mut() = snapshot;
        Self {
            inner: Rc::new(inner),
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    pub fn is_current_track(&self, id: &str) -> bool {
        self.inner.snapshot.borrow().is_current_track(id)
    }

    /// Register `listener`; it is called with every published snapshot until
    /// the returned guard is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&PlayerSnapshot) + 'static,
    {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Box::new(listener)));
        trace!(id, "subscriber added");
        Subscription {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Apply `cmd` and publish, or queue it if a dispatch is already running.
    pub fn dispatch(&self, cmd: PlayerCmd) {
        self.inner.pending.borrow_mut().push_back(cmd);
        if self.inner.dispatching.get() {
            return;
        }

        self.inner.dispatching.set(true);
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(cmd) = next else {
                break;
            };
            if self.apply(cmd) {
                self.publish();
            }
        }
        self.inner.dispatching.set(false);
    }

    /// Returns whether state may have changed.
    fn apply(&self, cmd: PlayerCmd) -> bool {
        if !matches!(cmd, PlayerCmd::Pump) {
            debug!(?cmd, "player command");
        }
        let mut t = self.inner.transport.borrow_mut();
        match cmd {
            PlayerCmd::Play(track) => {
                self.inner.mini_player_visible.set(true);
                t.play(&track);
            }
            PlayerCmd::Pause => t.pause(),
            PlayerCmd::TogglePlay => t.toggle_play(),
            PlayerCmd::Seek(seconds) => t.seek(seconds),
            PlayerCmd::SetVolume(v) => t.set_volume(v),
            PlayerCmd::ToggleMute => t.toggle_mute(),
            PlayerCmd::Reset => t.reset(),
            PlayerCmd::Close => t.close(),
            PlayerCmd::Next => t.play_next(),
            PlayerCmd::Previous => t.play_previous(),
            PlayerCmd::AddToQueue(track) => return t.add_to_queue(&track),
            PlayerCmd::RemoveFromQueue(id) => return t.remove_from_queue(&id),
            PlayerCmd::ClearQueue => t.clear_queue(),
            PlayerCmd::ToggleMiniPlayer => {
                let v = self.inner.mini_player_visible.get();
                self.inner.mini_player_visible.set(!v);
            }
            PlayerCmd::DragStart => t.set_dragging(true),
            PlayerCmd::DragEnd => t.set_dragging(false),
            PlayerCmd::Pump => return t.pump(),
        }
        true
    }

    fn publish(&self) {
        let snapshot = self.inner.take_snapshot();
        *self.inner.snapshot.borrow_mut() = snapshot.clone();

        self.inner.notifying.set(true);
        let mut listeners = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        for (id, listener) in listeners.iter_mut() {
            if self.inner.removed.borrow().contains(id) {
                continue;
            }
            listener(&snapshot);
        }
        {
            // Subscribers added during notification were pushed to the now-empty slot.
            let mut slot = self.inner.listeners.borrow_mut();
            listeners.append(&mut slot);
            *slot = listeners;
        }
        self.inner.notifying.set(false);
        self.inner.purge_removed();
    }

    pub fn play(&self, track: &Track) {
        self.dispatch(PlayerCmd::Play(track.clone()));
    }

    pub fn pause(&self) {
        self.dispatch(PlayerCmd::Pause);
    }

    pub fn toggle_play(&self) {
        self.dispatch(PlayerCmd::TogglePlay);
    }

    pub fn seek(&self, seconds: f64) {
        self.dispatch(PlayerCmd::Seek(seconds));
    }

    pub fn set_volume(&self, volume: f32) {
        self.dispatch(PlayerCmd::SetVolume(volume));
    }

    pub fn toggle_mute(&self) {
        self.dispatch(PlayerCmd::ToggleMute);
    }

    pub fn reset(&self) {
        self.dispatch(PlayerCmd::Reset);
    }

    pub fn close(&self) {
        self.dispatch(PlayerCmd::Close);
    }

    pub fn play_next(&self) {
        self.dispatch(PlayerCmd::Next);
    }

    pub fn play_previous(&self) {
        self.dispatch(PlayerCmd::Previous);
    }

    pub fn add_to_queue(&self, track: &Track) {
        self.dispatch(PlayerCmd::AddToQueue(track.clone()));
    }

    pub fn remove_from_queue(&self, id: &str) {
        self.dispatch(PlayerCmd::RemoveFromQueue(id.to_string()));
    }

    pub fn clear_queue(&self) {
        self.dispatch(PlayerCmd::ClearQueue);
    }

    pub fn toggle_mini_player(&self) {
        self.dispatch(PlayerCmd::ToggleMiniPlayer);
    }

    pub fn drag_start(&self) {
        self.dispatch(PlayerCmd::DragStart);
    }

    pub fn drag_end(&self) {
        self.dispatch(PlayerCmd::DragEnd);
    }

    /// Pull pending element events through the transport core.
    pub fn pump(&self) {
        self.dispatch(PlayerCmd::Pump);
    }
}
