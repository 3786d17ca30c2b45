//! Wall-clock source for kiosk submissions.

use std::fmt;

use chrono::{Local, NaiveDateTime};

/// Supplies the current local date and time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_same_instant() {
        let instant =
            NaiveDateTime::parse_from_str("2025-11-29 08:15:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }
}
