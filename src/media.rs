//! The single underlying media element and the events it emits.
//!
//! `MediaElement` is the play/pause/seek/volume surface the transport core
//! drives. `RodioElement` backs it with a `rodio` sink; tests use the
//! scripted element in `media::scripted`.

mod element;
mod loader;
mod rodio_element;
mod source;

pub use element::{MediaElement, MediaEvent};
pub use rodio_element::RodioElement;

#[cfg(test)]
pub mod scripted;
