use crate::player::{PlayerSnapshot, SharedPlayer};

/// Seek bar with click and drag-to-seek.
///
/// Pointer coordinates are relative to the bar's left edge; `width` is the
/// bar's current width in the same unit. While a drag is in progress the
/// transport ignores element time updates, so the knob follows the pointer.
#[derive(Debug, Default)]
pub struct ProgressControl {
    dragging: bool,
    last_x: f64,
    last_width: f64,
}

impl ProgressControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Filled fraction of the bar in `[0, 1]`; zero until a duration is known.
    pub fn fraction(snapshot: &PlayerSnapshot) -> f64 {
        let d = snapshot.state.duration_seconds;
        if !(d > 0.0) {
            return 0.0;
        }
        (snapshot.state.current_time_seconds / d).clamp(0.0, 1.0)
    }

    /// Media time under pointer `x` on a bar `width` wide.
    pub fn time_at(x: f64, width: f64, duration: f64) -> f64 {
        if !(width > 0.0) || !(duration > 0.0) || !x.is_finite() {
            return 0.0;
        }
        (x.clamp(0.0, width) / width) * duration
    }

    fn seek_to(&mut self, player: &SharedPlayer, x: f64, width: f64) {
        self.last_x = x;
        self.last_width = width;
        let duration = player.snapshot().state.duration_seconds;
        player.seek(Self::time_at(x, width, duration));
    }

    pub fn pointer_down(&mut self, player: &SharedPlayer, x: f64, width: f64) {
        self.dragging = true;
        player.drag_start();
        self.seek_to(player, x, width);
    }

    pub fn pointer_move(&mut self, player: &SharedPlayer, x: f64, width: f64) {
        if self.dragging {
            self.seek_to(player, x, width);
        }
    }

    pub fn pointer_up(&mut self, player: &SharedPlayer, x: f64, width: f64) {
        if self.dragging {
            self.seek_to(player, x, width);
            self.finish(player);
        }
    }

    /// The pointer left the bar mid-drag: commit the last known position.
    pub fn pointer_leave(&mut self, player: &SharedPlayer) {
        if self.dragging {
            let (x, width) = (self.last_x, self.last_width);
            self.seek_to(player, x, width);
            self.finish(player);
        }
    }

    /// A button release seen anywhere else ends the drag without seeking.
    pub fn release(&mut self, player: &SharedPlayer) {
        if self.dragging {
            self.finish(player);
        }
    }

    fn finish(&mut self, player: &SharedPlayer) {
        self.dragging = false;
        player.drag_end();
    }
}
