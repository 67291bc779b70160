//! Track catalog: the immutable, ordered list of playable items.
//!
//! The catalog is supplied once at startup (built in, or read from a TOML
//! file) and is never written back to by the player.

mod builtin;
mod load;
mod model;

pub use model::*;
