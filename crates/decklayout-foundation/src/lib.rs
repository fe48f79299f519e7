//! Input foundation for decklayout: pointer events, velocity tracking and
//! the gesture thresholds the deck reads from its [`ViewConfiguration`].

pub mod gesture_constants;
mod input;
mod velocity_tracker;
mod view_configuration;

pub use decklayout_ui_graphics::{Point, Size};
pub use input::*;
pub use velocity_tracker::*;
pub use view_configuration::*;
