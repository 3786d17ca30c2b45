//! Error types for the attendance kiosk.
//!
//! Every failure in the kiosk is a recoverable, validation-level condition:
//! the caller corrects the input and submits again. Nothing here is fatal.

use thiserror::Error;

/// The main error type for the attendance kiosk.
///
/// # Example
///
/// ```
/// use attendance_kiosk::error::KioskError;
///
/// let error = KioskError::InvalidPin {
///     pin: "12ab".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid PIN '12ab': must be exactly 6 digits");
/// ```
#[derive(Debug, Error)]
pub enum KioskError {
    /// No employee holds the given PIN.
    #[error("No employee found for the given PIN")]
    PinNotFound,

    /// A PIN was not exactly six ASCII digits.
    #[error("Invalid PIN '{pin}': must be exactly 6 digits")]
    InvalidPin {
        /// The rejected PIN.
        pin: String,
    },

    /// An employee field was missing or malformed.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A time of day was out of range or could not be parsed.
    #[error("Invalid time '{value}': {message}")]
    InvalidTime {
        /// The rejected value.
        value: String,
        /// A description of the problem.
        message: String,
    },

    /// A check-in or check-out was submitted without a photo.
    #[error("A photo is required to check {action}")]
    PhotoRequired {
        /// Either "in" or "out".
        action: String,
    },

    /// A rejection was attempted without a reviewer note.
    #[error("A reviewer note is required to reject record '{record_id}'")]
    ReviewNoteRequired {
        /// The record that was left untouched.
        record_id: String,
    },

    /// The attendance record does not exist.
    #[error("Attendance record not found: {record_id}")]
    RecordNotFound {
        /// The requested record id.
        record_id: String,
    },

    /// The record has already been approved or rejected.
    #[error("Attendance record '{record_id}' has already been reviewed ({status})")]
    RecordAlreadyReviewed {
        /// The record id.
        record_id: String,
        /// The terminal status the record is in.
        status: String,
    },

    /// A check-out found no check-in for the employee on that day.
    #[error("No check-in found for employee '{employee_id}' on {date}")]
    CheckInNotFound {
        /// The employee checking out.
        employee_id: String,
        /// The attendance day.
        date: String,
    },

    /// A pending submission was cancelled before it committed.
    #[error("Submission was cancelled before it was recorded")]
    SubmissionCancelled,

    /// A pending submission did not commit within the configured timeout.
    #[error("Submission timed out after {timeout_ms}ms")]
    SubmissionTimedOut {
        /// The configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// Admin login failed.
    #[error("Invalid admin credentials")]
    InvalidCredentials,

    /// An admin operation was attempted without a valid session.
    #[error("Admin session is missing or has expired")]
    Unauthorized,

    /// A password could not be hashed.
    #[error("Failed to hash password: {message}")]
    PasswordHash {
        /// A description of the hashing failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return KioskError.
pub type KioskResult<T> = Result<T, KioskError>;
