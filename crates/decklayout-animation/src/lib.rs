//! Animation system for decklayout
//!
//! Time-based tweens with easing curves, optional delay and repeat, chained
//! into sequences and driven frame by frame from a [`decklayout_core::FrameClock`].

mod animation;
mod tween_sequence;

pub use animation::*;
pub use tween_sequence::*;
