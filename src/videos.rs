//! Channel video listing.
//!
//! Fetches the channel's uploads from the YouTube Data API and flattens them
//! into [`Video`]s. A failed fetch never takes the application down: the
//! caller gets an empty [`VideoFeed`] with an explanation to show instead.

mod model;
mod youtube;

pub use model::{Video, VideoFeed};
pub use youtube::{YouTubeClient, load_feed, parse_playlist_items, uploads_playlist_id};

#[cfg(test)]
mod tests;
