//! PIN validation and generation, plus employee code defaults.

use rand::Rng;

use crate::error::{KioskError, KioskResult};

/// Number of digits in an employee PIN.
pub const PIN_LENGTH: usize = 6;

/// Checks that `pin` is exactly six ASCII digits after trimming and returns
/// the trimmed PIN.
///
/// # Examples
///
/// ```
/// use attendance_kiosk::calculation::validate_pin;
///
/// assert_eq!(validate_pin(" 445566 ").unwrap(), "445566");
/// assert!(validate_pin("44556").is_err());
/// assert!(validate_pin("44556a").is_err());
/// ```
pub fn validate_pin(pin: &str) -> KioskResult<&str> {
    let trimmed = pin.trim();
    if trimmed.len() == PIN_LENGTH && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed)
    } else {
        Err(KioskError::InvalidPin {
            pin: pin.to_string(),
        })
    }
}

/// Generates a random PIN in `100000..=999999`.
pub fn generate_pin() -> String {
    rand::thread_rng().gen_range(100_000..=999_999u32).to_string()
}

/// Formats the sequential employee code `EMP###` for the `position`-th
/// employee (1-based).
///
/// ```
/// use attendance_kiosk::calculation::default_employee_code;
///
/// assert_eq!(default_employee_code(4), "EMP004");
/// assert_eq!(default_employee_code(1234), "EMP1234");
/// ```
pub fn default_employee_code(position: usize) -> String {
    format!("EMP{:03}", position)
}
