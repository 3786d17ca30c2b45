//! Late-penalty calculation.
//!
//! Each minute an employee checks in after the configured work start costs a
//! fixed amount. The result is computed once at check-in and stored on the
//! attendance record.

use serde::{Deserialize, Serialize};

use crate::models::ClockTime;

/// Penalty charged per late minute in the default policy.
pub const DEFAULT_PENALTY_RATE_PER_MINUTE: u32 = 2;

/// Work start hour in the default policy (08:00).
pub const DEFAULT_WORK_START_HOUR: u32 = 8;

/// The cutoff and rate used to compute late penalties.
///
/// # Example
///
/// ```
/// use attendance_kiosk::calculation::LatePolicy;
///
/// let policy = LatePolicy::default();
/// assert_eq!(policy.work_start.to_string(), "08:00");
/// assert_eq!(policy.rate_per_minute, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatePolicy {
    /// Check-ins after this time are late.
    pub work_start: ClockTime,
    /// Penalty per late minute.
    pub rate_per_minute: u32,
}

impl Default for LatePolicy {
    fn default() -> Self {
        Self {
            work_start: ClockTime::from_hm_unchecked(DEFAULT_WORK_START_HOUR, 0),
            rate_per_minute: DEFAULT_PENALTY_RATE_PER_MINUTE,
        }
    }
}

/// Minutes late and the penalty owed for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatePenaltyResult {
    /// Minutes past the work start; zero when on time.
    pub late_minutes: u32,
    /// `late_minutes` times the policy rate.
    pub late_penalty: u64,
}

/// Computes the late minutes and penalty for a check-in time.
///
/// A check-in at or before the work start is on time and yields zero for
/// both values.
///
/// # Examples
///
/// ```
/// use attendance_kiosk::calculation::{calculate_late_penalty, LatePolicy};
/// use attendance_kiosk::models::ClockTime;
///
/// let policy = LatePolicy::default();
///
/// let on_time = calculate_late_penalty(ClockTime::new(8, 0).unwrap(), &policy);
/// assert_eq!(on_time.late_minutes, 0);
/// assert_eq!(on_time.late_penalty, 0);
///
/// let late = calculate_late_penalty(ClockTime::new(8, 45).unwrap(), &policy);
/// assert_eq!(late.late_minutes, 45);
/// assert_eq!(late.late_penalty, 90);
/// ```
pub fn calculate_late_penalty(check_in: ClockTime, policy: &LatePolicy) -> LatePenaltyResult {
    let late_minutes = check_in
        .minute_of_day()
        .saturating_sub(policy.work_start.minute_of_day());

    LatePenaltyResult {
        late_minutes,
        late_penalty: u64::from(late_minutes) * u64::from(policy.rate_per_minute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(hour: u32, minute: u32) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    #[test]
    fn test_on_time_check_in_has_no_penalty() {
        let result = calculate_late_penalty(at(8, 0), &LatePolicy::default());
        assert_eq!(result, LatePenaltyResult::default());
    }

    #[test]
    fn test_early_check_in_has_no_penalty() {
        let result = calculate_late_penalty(at(7, 30), &LatePolicy::default());
        assert_eq!(result.late_minutes, 0);
        assert_eq!(result.late_penalty, 0);
    }

    #[test]
    fn test_fifteen_minutes_late() {
        let result = calculate_late_penalty(at(8, 15), &LatePolicy::default());
        assert_eq!(result.late_minutes, 15);
        assert_eq!(result.late_penalty, 30);
    }

    #[test]
    fn test_forty_five_minutes_late() {
        let result = calculate_late_penalty(at(8, 45), &LatePolicy::default());
        assert_eq!(result.late_minutes, 45);
        assert_eq!(result.late_penalty, 90);
    }

    #[test]
    fn test_afternoon_check_in() {
        let result = calculate_late_penalty(at(17, 30), &LatePolicy::default());
        assert_eq!(result.late_minutes, 570);
        assert_eq!(result.late_penalty, 1140);
    }

    #[test]
    fn test_one_minute_after_start() {
        let result = calculate_late_penalty(at(8, 1), &LatePolicy::default());
        assert_eq!(result.late_minutes, 1);
        assert_eq!(result.late_penalty, 2);
    }

    #[test]
    fn test_custom_policy() {
        let policy = LatePolicy {
            work_start: at(9, 30),
            rate_per_minute: 5,
        };
        let result = calculate_late_penalty(at(9, 40), &policy);
        assert_eq!(result.late_minutes, 10);
        assert_eq!(result.late_penalty, 50);
    }

    #[test]
    fn test_largest_rate_does_not_overflow() {
        let policy = LatePolicy {
            work_start: at(0, 0),
            rate_per_minute: u32::MAX,
        };
        let result = calculate_late_penalty(at(23, 59), &policy);
        assert_eq!(result.late_minutes, 1439);
        assert_eq!(result.late_penalty, 1439 * u64::from(u32::MAX));
    }

    proptest! {
        #[test]
        fn prop_no_penalty_at_or_before_work_start(minute_of_day in 0u32..=480) {
            let time = at(minute_of_day / 60, minute_of_day % 60);
            let result = calculate_late_penalty(time, &LatePolicy::default());
            prop_assert_eq!(result.late_minutes, 0);
            prop_assert_eq!(result.late_penalty, 0);
        }

        #[test]
        fn prop_penalty_is_linear_after_work_start(minute_of_day in 481u32..1440) {
            let time = at(minute_of_day / 60, minute_of_day % 60);
            let result = calculate_late_penalty(time, &LatePolicy::default());
            prop_assert_eq!(result.late_minutes, minute_of_day - 480);
            prop_assert_eq!(result.late_penalty, u64::from(result.late_minutes) * 2);
        }
    }
}
