//! Timestamp utilities
//!
//! Render-time values such as the footer's copyright year are computed from an
//! injected [`Clock`] so components can be tested against a fixed instant.

use chrono::{DateTime, Datelike, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert fractional seconds (as written in animation tables) to a duration
///
/// Rounded to whole milliseconds so `0.8` is exactly 800ms. Negative and
/// non-finite inputs collapse to zero.
pub fn secs_to_duration(secs: f32) -> std::time::Duration {
    if secs.is_finite() && secs > 0.0 {
        std::time::Duration::from_millis((f64::from(secs) * 1000.0).round() as u64)
    } else {
        std::time::Duration::ZERO
    }
}

/// Source of "now" for render-time values
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar year of [`Clock::now`]
    fn current_year(&self) -> i32 {
        self.now().year()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
