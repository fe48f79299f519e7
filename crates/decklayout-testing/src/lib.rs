//! Testing utilities and harness for decklayout

pub mod recording;
pub mod robot;
pub mod robot_assertions;

pub use recording::{DeckEvent, RecordingListener};
pub use robot::*;

pub mod prelude {
    pub use crate::recording::{DeckEvent, RecordingListener};
    pub use crate::robot::*;
    pub use crate::robot_assertions;
    pub use crate::robot_assertions::assert_approx_eq;
}
