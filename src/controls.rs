//! Per-surface playback controls.
//!
//! Every control is a thin view over a [`PlayerSnapshot`]: it derives what to
//! show from the snapshot and turns user input into commands on the
//! [`SharedPlayer`]. None of them hold playback state of their own.
//!
//! [`PlayerSnapshot`]: crate::player::PlayerSnapshot
//! [`SharedPlayer`]: crate::player::SharedPlayer

mod buttons;
mod card;
mod format;
mod progress;
mod volume;
mod waveform;

pub use buttons::TransportButtons;
pub use card::CardView;
pub use format::format_time;
pub use progress::ProgressControl;
pub use volume::{VolumeControl, VolumeTier};
pub use waveform::Waveform;
