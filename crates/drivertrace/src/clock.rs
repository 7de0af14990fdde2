//! Monotonic time sources for duration measurement.
//!
//! Durations on event records are always taken from a monotonic source so
//! that wall-clock adjustments cannot skew them. Wall-clock time is only used
//! for the human-readable record timestamp.
//!
//! [`FakeClock`] lets tests drive time by hand and assert exact durations.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic reading source.
///
/// `now()` returns the time elapsed since an arbitrary, fixed origin. Readings
/// never decrease.
pub trait MonotonicClock: fmt::Debug + Send + Sync {
    /// Current reading
    fn now(&self) -> Duration;
}

/// Monotonic clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for deterministic tests
#[derive(Debug, Default)]
pub struct FakeClock {
    /// Current reading in nanoseconds
    current_ns: AtomicU64,
}

impl FakeClock {
    /// Create a fake clock reading zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake clock at a fixed reading
    #[must_use]
    pub fn at(reading: Duration) -> Self {
        let clock = Self::new();
        clock.set(reading);
        clock
    }

    /// Move the clock forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let ns = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .current_ns
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |cur| {
                Some(cur.saturating_add(ns))
            });
    }

    /// Move the clock forward by `ms` milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Set the reading. Going backwards is ignored.
    pub fn set(&self, reading: Duration) {
        let ns = u64::try_from(reading.as_nanos()).unwrap_or(u64::MAX);
        self.current_ns.fetch_max(ns, Ordering::SeqCst);
    }
}

impl MonotonicClock for FakeClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.current_ns.load(Ordering::SeqCst))
    }
}

/// Shared clock handle
pub type SharedClock = Arc<dyn MonotonicClock>;

/// Create a shared system clock
#[must_use]
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock::new())
}
