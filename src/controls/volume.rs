use crate::player::{PlayerSnapshot, SharedPlayer};

/// Which speaker glyph the volume control shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VolumeTier {
    Muted,
    Low,
    High,
}

impl VolumeTier {
    pub fn of(snapshot: &PlayerSnapshot) -> Self {
        let s = &snapshot.state;
        if s.is_muted || s.volume == 0.0 {
            VolumeTier::Muted
        } else if s.volume < 0.5 {
            VolumeTier::Low
        } else {
            VolumeTier::High
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            VolumeTier::Muted => "🔇",
            VolumeTier::Low => "🔉",
            VolumeTier::High => "🔊",
        }
    }
}

/// Mute button plus a horizontal slider.
#[derive(Debug, Clone)]
pub struct VolumeControl {
    step: f32,
}

impl VolumeControl {
    pub fn new(step: f32) -> Self {
        Self { step }
    }

    /// Slider value under pointer `x` on a slider `width` wide.
    pub fn value_at(x: f64, width: f64) -> f32 {
        if !(width > 0.0) || !x.is_finite() {
            return 0.0;
        }
        (x.clamp(0.0, width) / width) as f32
    }

    pub fn slide(&self, player: &SharedPlayer, x: f64, width: f64) {
        player.set_volume(Self::value_at(x, width));
    }

    pub fn toggle_mute(&self, player: &SharedPlayer) {
        player.toggle_mute();
    }

    pub fn louder(&self, player: &SharedPlayer) {
        self.nudge(player, self.step);
    }

    pub fn quieter(&self, player: &SharedPlayer) {
        self.nudge(player, -self.step);
    }

    fn nudge(&self, player: &SharedPlayer, delta: f32) {
        let current = player.snapshot().state.volume;
        // Round to the slider's 0.01 resolution so repeated steps don't drift.
        let next = ((current + delta) * 100.0).round() / 100.0;
        player.set_volume(next);
    }
}
