use std::ops::Range;

/// Viewport size class deciding how many cards fit on a page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Breakpoint {
    Small,
    Medium,
    Large,
}

impl Breakpoint {
    pub fn from_width(width_px: f64, medium_min: f64, large_min: f64) -> Self {
        if width_px < medium_min {
            Breakpoint::Small
        } else if width_px < large_min {
            Breakpoint::Medium
        } else {
            Breakpoint::Large
        }
    }

    pub fn items_per_page(self) -> usize {
        match self {
            Breakpoint::Small => 1,
            Breakpoint::Medium => 2,
            Breakpoint::Large => 3,
        }
    }
}

/// Page bookkeeping for a carousel. `offset` is the index of the first
/// visible item and is always a multiple of `items_per_page`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pager {
    total_items: usize,
    items_per_page: usize,
    offset: usize,
    direction: i8,
}

impl Pager {
    pub fn new(total_items: usize, items_per_page: usize) -> Self {
        Self {
            total_items,
            items_per_page: items_per_page.max(1),
            offset: 0,
            direction: 0,
        }
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Sign of the last page change: 1 forward, -1 back, 0 before any.
    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page)
    }

    /// Zero-based index of the visible page.
    pub fn current_page(&self) -> usize {
        self.offset / self.items_per_page
    }

    /// More items than fit on one page.
    pub fn is_paginated(&self) -> bool {
        self.total_items > self.items_per_page
    }

    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.items_per_page).min(self.total_items);
        self.offset.min(end)..end
    }

    pub fn next(&mut self) {
        self.direction = 1;
        self.offset = if self.offset + self.items_per_page >= self.total_items {
            0
        } else {
            self.offset + self.items_per_page
        };
    }

    /// Back one page; from the first page, wrap to the start of the last one.
    pub fn previous(&mut self) {
        self.direction = -1;
        self.offset = if self.offset > 0 {
            self.offset.saturating_sub(self.items_per_page)
        } else {
            self.last_page_offset()
        };
    }

    /// Jump to `page`. Out-of-range pages are ignored; reselecting the
    /// visible page keeps the last direction.
    pub fn select(&mut self, page: usize) -> bool {
        if page >= self.total_pages() {
            return false;
        }
        let current = self.current_page();
        if page != current {
            self.direction = if page > current { 1 } else { -1 };
        }
        self.offset = page * self.items_per_page;
        true
    }

    /// Change the page size, keeping the first visible item on screen.
    pub fn set_items_per_page(&mut self, n: usize) {
        let n = n.max(1);
        if n == self.items_per_page {
            return;
        }
        self.items_per_page = n;
        self.offset = (self.offset / n) * n;
        self.clamp_offset();
    }

    pub fn set_total_items(&mut self, n: usize) {
        self.total_items = n;
        self.clamp_offset();
    }

    fn last_page_offset(&self) -> usize {
        self.total_pages().saturating_sub(1) * self.items_per_page
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.last_page_offset());
    }
}
