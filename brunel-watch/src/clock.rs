//! Millisecond clock seam
//!
//! Delta-fetch windows are computed from wall-clock epoch milliseconds.
//! Sessions take the clock as a trait object so tests can drive windowing
//! deterministically.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of epoch timestamps for windowing decisions.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}
