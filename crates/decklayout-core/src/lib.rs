//! Core runtime pieces for decklayout
//!
//! The deck runs on one UI thread. Work that has to happen "on the next
//! frame" (animation ticks) is queued on a [`FrameClock`] and executed when
//! the host drains it with the current frame time.

mod frame_clock;

pub use frame_clock::*;
