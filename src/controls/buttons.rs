use crate::player::{PlayerSnapshot, SharedPlayer};

/// Play/pause and reset buttons of a player surface.
#[derive(Debug, Clone)]
pub struct TransportButtons {
    reset_threshold_seconds: f64,
}

impl TransportButtons {
    pub fn new(reset_threshold_seconds: f64) -> Self {
        Self {
            reset_threshold_seconds,
        }
    }

    pub fn play_enabled(&self, snapshot: &PlayerSnapshot) -> bool {
        snapshot.current.is_some() && snapshot.state.last_error.is_none()
    }

    pub fn reset_enabled(&self, snapshot: &PlayerSnapshot) -> bool {
        self.play_enabled(snapshot)
            && snapshot.state.current_time_seconds >= self.reset_threshold_seconds
    }

    /// Returns whether the press was accepted.
    pub fn press_play(&self, player: &SharedPlayer) -> bool {
        if !self.play_enabled(&player.snapshot()) {
            return false;
        }
        player.toggle_play();
        true
    }

    pub fn press_reset(&self, player: &SharedPlayer) -> bool {
        if !self.reset_enabled(&player.snapshot()) {
            return false;
        }
        player.reset();
        true
    }
}
