//! Shared gesture constants for touch handling.
//!
//! Values are in logical pixels. For very high-density touch screens,
//! scale them by the device's density through [`crate::ViewConfiguration`].

/// Horizontal travel, in logical pixels, before a touch turns into a drag.
///
/// Matches Android's `ViewConfiguration.TOUCH_SLOP` of 8dp at baseline density.
pub const TOUCH_SLOP: f32 = 8.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity on a baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
