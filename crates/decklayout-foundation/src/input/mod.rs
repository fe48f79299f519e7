mod types;
mod uptime;

pub use types::*;
pub use uptime::*;
