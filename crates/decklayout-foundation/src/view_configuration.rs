use crate::gesture_constants::{MAX_FLING_VELOCITY, TOUCH_SLOP};

/// Device-dependent gesture thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfiguration {
    /// Distance in pixels a pointer may wander before a drag starts.
    pub touch_slop: f32,
    /// Upper bound, in pixels per second, for release velocities.
    pub max_fling_velocity: f32,
}

impl ViewConfiguration {
    /// Thresholds scaled for a screen `density` times the baseline.
    pub fn with_density(density: f32) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            log::warn!("ignoring invalid density {density}, using 1.0");
            1.0
        };
        Self {
            touch_slop: TOUCH_SLOP * density,
            max_fling_velocity: MAX_FLING_VELOCITY * density,
        }
    }
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
            max_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}
