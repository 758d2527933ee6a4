//! Time sources and time arithmetic
//!
//! The engine never reads the wall clock directly. It consumes a [`Clock`],
//! which must be monotonically non-decreasing, and reads it once per call.
//!
//! Two pieces of arithmetic are shared across domains:
//! - the 30-day premium window, which also serves as the delinquency proof
//! - the legacy year derivation `1970 + unix_seconds / SECONDS_PER_YEAR`,
//!   which ignores leap years and is kept for compatibility with historical data

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Length of a premium period
pub const PREMIUM_WINDOW_DAYS: i64 = 30;

/// Fixed 365-day year used by the legacy year derivation
pub const SECONDS_PER_YEAR: i64 = 31_536_000;

/// Year zero of the legacy derivation
pub const EPOCH_YEAR: u32 = 1970;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Clock cannot move backwards from {current} to {requested}")]
    ClockWentBackwards {
        current: String,
        requested: String,
    },
}

/// Source of the current time for engine calls
pub trait Clock: Send + Sync {
    /// Returns the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
///
/// Used by tests and simulations. Resolution is one second, matching the
/// granularity of the legacy year arithmetic.
#[derive(Debug)]
pub struct ManualClock {
    unix_seconds: AtomicI64,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant
    pub fn starting_at(instant: DateTime<Utc>) -> Self {
        Self {
            unix_seconds: AtomicI64::new(instant.timestamp()),
        }
    }

    /// Moves the clock forward
    ///
    /// Negative durations are ignored so the clock never runs backwards.
    pub fn advance(&self, by: Duration) {
        let secs = by.num_seconds().max(0);
        self.unix_seconds.fetch_add(secs, Ordering::SeqCst);
    }

    /// Moves the clock forward by whole days
    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }

    /// Jumps to a later instant
    pub fn set(&self, instant: DateTime<Utc>) -> Result<(), TemporalError> {
        let requested = instant.timestamp();
        let current = self.unix_seconds.load(Ordering::SeqCst);
        if requested < current {
            return Err(TemporalError::ClockWentBackwards {
                current: current.to_string(),
                requested: requested.to_string(),
            });
        }
        self.unix_seconds.store(requested, Ordering::SeqCst);
        Ok(())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let secs = self.unix_seconds.load(Ordering::SeqCst);
        DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// The premium window as a duration
pub fn premium_window() -> Duration {
    Duration::days(PREMIUM_WINDOW_DAYS)
}

/// Returns true once a full premium window has passed since `anchor`
pub fn window_elapsed(anchor: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= anchor + premium_window()
}

/// Derives a calendar-ish year from a timestamp using the fixed 365-day year
///
/// Timestamps before the epoch clamp to [`EPOCH_YEAR`].
pub fn legacy_year(instant: DateTime<Utc>) -> u32 {
    let secs = instant.timestamp().max(0);
    EPOCH_YEAR + (secs / SECONDS_PER_YEAR) as u32
}
