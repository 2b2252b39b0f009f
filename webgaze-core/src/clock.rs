//! Wall-clock abstraction
//!
//! The payload builder stamps each event with the current local hour. The
//! clock sits behind a trait so tests can pin the hour instead of depending
//! on when they happen to run.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local};

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    /// Current time in the local timezone.
    fn now(&self) -> DateTime<Local>;
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually driven clock for deterministic tests.
///
/// Holds a settable instant as epoch milliseconds; `now` converts it back
/// into the local timezone.
#[derive(Debug)]
pub struct ManualClock {
    epoch_millis: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    pub fn fixed(now: DateTime<Local>) -> Self {
        Self {
            epoch_millis: AtomicI64::new(now.timestamp_millis()),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: DateTime<Local>) {
        self.epoch_millis.store(now.timestamp_millis(), Ordering::SeqCst);
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, delta: chrono::Duration) {
        self.epoch_millis
            .fetch_add(delta.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        DateTime::from_timestamp_millis(self.epoch_millis.load(Ordering::SeqCst))
            .unwrap_or_default()
            .with_timezone(&Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_manual_clock_holds_instant() {
        let at = Local.with_ymd_and_hms(2024, 6, 1, 23, 15, 0).unwrap();
        let clock = ManualClock::fixed(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now().hour(), 23);
    }

    #[test]
    fn test_manual_clock_advances() {
        let at = Local.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let clock = ManualClock::fixed(at);
        clock.advance(chrono::Duration::hours(2));
        assert_eq!(clock.now().hour(), 12);
    }

    #[test]
    fn test_system_clock_is_current() {
        let before = Local::now();
        let observed = SystemClock.now();
        let after = Local::now();
        assert!(observed >= before && observed <= after);
    }
}
