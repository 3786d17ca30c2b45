//! Wall-clock time-of-day and photo payload types.
//!
//! This module defines [`ClockTime`], the hour/minute pair recorded on
//! check-in and check-out, and [`Photo`], the opaque image payload supplied
//! by the capture device.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{KioskError, KioskResult};

/// A time of day with minute precision, serialized as `HH:MM`.
///
/// # Example
///
/// ```
/// use attendance_kiosk::models::ClockTime;
///
/// let time = ClockTime::new(8, 15).unwrap();
/// assert_eq!(time.minute_of_day(), 495);
/// assert_eq!(time.to_string(), "08:15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    /// Creates a time of day, rejecting hours above 23 and minutes above 59.
    pub fn new(hour: u32, minute: u32) -> KioskResult<Self> {
        if hour > 23 {
            return Err(KioskError::InvalidTime {
                value: format!("{}:{:02}", hour, minute),
                message: "hour must be between 0 and 23".to_string(),
            });
        }
        if minute > 59 {
            return Err(KioskError::InvalidTime {
                value: format!("{}:{:02}", hour, minute),
                message: "minute must be between 0 and 59".to_string(),
            });
        }
        Ok(Self { hour, minute })
    }

    /// Builds a time from components already known to be in range.
    pub(crate) const fn from_hm_unchecked(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Truncates a [`NaiveTime`] to minute precision.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }

    /// The hour component (0-23).
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// The minute component (0-59).
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = KioskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KioskError::InvalidTime {
            value: s.to_string(),
            message: "expected HH:MM".to_string(),
        };

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse::<u32>().map_err(|_| invalid())?;
        let minute = minute.parse::<u32>().map_err(|_| invalid())?;

        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = KioskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

/// An opaque encoded still image captured at check-in or check-out.
///
/// The empty string means "no photo". The payload is stored as-is and never
/// inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(String);

impl Photo {
    /// Wraps an encoded image payload.
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    /// Returns true when no image was captured.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The raw payload.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
