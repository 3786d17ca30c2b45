//! Calculation logic for the attendance kiosk.
//!
//! This module contains the pure functions behind the kiosk: the late-penalty
//! rule applied at check-in, and PIN validation and generation.

mod late_penalty;
mod pin;

pub use late_penalty::{
    DEFAULT_PENALTY_RATE_PER_MINUTE, DEFAULT_WORK_START_HOUR, LatePenaltyResult, LatePolicy,
    calculate_late_penalty,
};
pub use pin::{PIN_LENGTH, default_employee_code, generate_pin, validate_pin};
