//! Player module: the media transport core, its play queue and the shared
//! state broadcast every UI surface observes.
//!
//! Exactly one `SharedPlayer` exists per session. Surfaces never touch the
//! media element; they dispatch `PlayerCmd`s and read `PlayerSnapshot`s.

mod queue;
mod shared;
mod state;
mod transport;

pub use queue::PlayQueue;
pub use shared::{PlayerCmd, PlayerSnapshot, SharedPlayer, Subscription};
pub use state::PlaybackState;
pub use transport::Transport;

#[cfg(test)]
mod tests;
