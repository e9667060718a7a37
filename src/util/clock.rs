//! Clock abstraction so timestamp-dependent logic is testable.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Source of the current time, injected into components that stamp
/// timestamps so tests can substitute a fixed value.
pub trait Clock: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> u128;
}

/// Wall-clock implementation backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u128 {
        now_ms()
    }
}

/// Clock frozen at a fixed instant, for tests and deterministic replay.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u128);

impl Clock for FixedClock {
    fn now_ms(&self) -> u128 {
        self.0
    }
}
