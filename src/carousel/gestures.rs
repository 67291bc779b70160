use tracing::trace;

/// Page change requested by a gesture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Previous,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum GestureState {
    Idle,
    Dragging { start_x: f64, scroll_offset: f64 },
}

/// Turns pointer, touch and wheel input into swipes.
///
/// A drag fires at most one swipe: once horizontal travel exceeds the
/// threshold the engine emits and returns to idle, ignoring the rest of the
/// motion. Dragging right pages back, dragging left pages forward.
#[derive(Debug, Clone)]
pub struct GestureEngine {
    threshold: f64,
    enabled: bool,
    state: GestureState,
}

impl GestureEngine {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            enabled: true,
            state: GestureState::Idle,
        }
    }

    /// Disabling drops any drag in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.state = GestureState::Idle;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Scroll offset recorded when the current drag began.
    pub fn drag_origin(&self) -> Option<(f64, f64)> {
        match self.state {
            GestureState::Dragging {
                start_x,
                scroll_offset,
            } => Some((start_x, scroll_offset)),
            GestureState::Idle => None,
        }
    }

    pub fn pointer_down(&mut self, x: f64, scroll_offset: f64) {
        if !self.enabled {
            return;
        }
        self.state = GestureState::Dragging {
            start_x: x,
            scroll_offset,
        };
    }

    pub fn pointer_move(&mut self, x: f64) -> Option<Swipe> {
        let GestureState::Dragging { start_x, .. } = self.state else {
            return None;
        };
        let distance = x - start_x;
        if distance.abs() <= self.threshold {
            return None;
        }
        self.state = GestureState::Idle;
        let swipe = if distance > 0.0 {
            Swipe::Previous
        } else {
            Swipe::Next
        };
        trace!(?swipe, distance, "drag swipe");
        Some(swipe)
    }

    pub fn pointer_up(&mut self) {
        self.state = GestureState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Horizontal-dominant wheel travel past the threshold swipes directly.
    pub fn wheel(&mut self, dx: f64, dy: f64) -> Option<Swipe> {
        if !self.enabled || dx.abs() <= dy.abs() {
            return None;
        }
        if dx > self.threshold {
            Some(Swipe::Next)
        } else if dx < -self.threshold {
            Some(Swipe::Previous)
        } else {
            None
        }
    }
}
