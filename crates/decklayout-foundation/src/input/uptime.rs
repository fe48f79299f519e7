use std::sync::OnceLock;
use web_time::Instant;

static ORIGIN: OnceLock<Instant> = OnceLock::new();

/// Milliseconds since the first call in this process.
///
/// Monotonic, used to timestamp pointer events that were not given an
/// explicit event time.
pub fn uptime_millis() -> i64 {
    let origin = ORIGIN.get_or_init(Instant::now);
    origin.elapsed().as_millis() as i64
}
