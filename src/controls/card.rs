use crate::catalog::Track;
use crate::player::{PlayerSnapshot, SharedPlayer};

/// A track card in a carousel. Only the active (visible, selected) card
/// shows the now-playing affordance; deactivating a card never pauses the
/// transport.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub track_id: String,
    pub active: bool,
}

impl CardView {
    pub fn new(track_id: impl Into<String>) -> Self {
        Self {
            track_id: track_id.into(),
            active: false,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_now_playing(&self, snapshot: &PlayerSnapshot) -> bool {
        self.active && snapshot.is_playing_track(&self.track_id)
    }

    /// The card's track is loaded, whether or not it is playing.
    pub fn is_loaded(&self, snapshot: &PlayerSnapshot) -> bool {
        snapshot.is_current_track(&self.track_id)
    }

    /// Toggle the card's track if it is loaded, otherwise start it.
    pub fn press(&self, player: &SharedPlayer, track: &Track) {
        if player.is_current_track(&track.id) {
            player.toggle_play();
        } else {
            player.play(track);
        }
    }
}
