//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog views, the
//! carousels, the video feed and the latest player snapshot. `app::browse`
//! holds the search, genre and sort rules for the music carousel.

mod browse;
mod model;

pub use browse::{MusicFilter, SortKey};
pub use model::*;
