//! Carousel navigation: pointer/touch/wheel gestures and page bookkeeping.
//!
//! The gesture engine turns raw pointer input into at most one swipe per
//! drag; the pager owns which slice of the items is visible. `Carousel` ties
//! the two together for a single carousel on screen.

mod gestures;
mod pager;

use tracing::debug;

pub use gestures::{GestureEngine, Swipe};
pub use pager::{Breakpoint, Pager};

/// One carousel: a pager driven by its gesture engine.
///
/// Gestures are only enabled while the items span more than one page.
#[derive(Debug, Clone)]
pub struct Carousel {
    pager: Pager,
    gestures: GestureEngine,
}

impl Carousel {
    pub fn new(total_items: usize, items_per_page: usize, swipe_threshold: f64) -> Self {
        let pager = Pager::new(total_items, items_per_page);
        let mut gestures = GestureEngine::new(swipe_threshold);
        gestures.set_enabled(pager.is_paginated());
        Self { pager, gestures }
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn set_items_per_page(&mut self, n: usize) {
        self.pager.set_items_per_page(n);
        self.gestures.set_enabled(self.pager.is_paginated());
    }

    pub fn set_total_items(&mut self, n: usize) {
        self.pager.set_total_items(n);
        self.gestures.set_enabled(self.pager.is_paginated());
    }

    pub fn next(&mut self) {
        self.pager.next();
    }

    pub fn previous(&mut self) {
        self.pager.previous();
    }

    pub fn select(&mut self, page: usize) -> bool {
        self.pager.select(page)
    }

    pub fn pointer_down(&mut self, x: f64, scroll_offset: f64) {
        self.gestures.pointer_down(x, scroll_offset);
    }

    /// Returns the swipe applied, if the move crossed the threshold.
    pub fn pointer_move(&mut self, x: f64) -> Option<Swipe> {
        let origin = self.gestures.drag_origin();
        let swipe = self.gestures.pointer_move(x)?;
        debug!(?swipe, ?origin, x, "carousel swipe");
        self.apply(swipe);
        Some(swipe)
    }

    pub fn pointer_up(&mut self) {
        self.gestures.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.gestures.pointer_leave();
    }

    pub fn wheel(&mut self, dx: f64, dy: f64) -> Option<Swipe> {
        let swipe = self.gestures.wheel(dx, dy)?;
        self.apply(swipe);
        Some(swipe)
    }

    fn apply(&mut self, swipe: Swipe) {
        match swipe {
            Swipe::Next => self.pager.next(),
            Swipe::Previous => self.pager.previous(),
        }
    }
}
