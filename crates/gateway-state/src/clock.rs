//! Wall-clock helper shared by the circuit breaker and rate limiter.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch, as an `f64` for easy arithmetic against
/// the store's `open_until_ts`/`rate_window_start` fields.
#[must_use]
pub fn now_unix() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
