//! Response types for the attendance kiosk API.
//!
//! This module defines the error response structures, the mapping from
//! [`KioskError`] to HTTP status codes, and the small success bodies that are
//! not domain models.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::LatePenaltyResult;
use crate::error::KioskError;
use crate::models::ClockTime;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 500 response carrying `error`.
    pub fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<KioskError> for ApiErrorResponse {
    fn from(error: KioskError) -> Self {
        let (status, code) = match &error {
            KioskError::PinNotFound => (StatusCode::NOT_FOUND, "PIN_NOT_FOUND"),
            KioskError::InvalidPin { .. } => (StatusCode::BAD_REQUEST, "INVALID_PIN"),
            KioskError::InvalidEmployee { .. } => (StatusCode::BAD_REQUEST, "INVALID_EMPLOYEE"),
            KioskError::InvalidTime { .. } => (StatusCode::BAD_REQUEST, "INVALID_TIME"),
            KioskError::PhotoRequired { .. } => (StatusCode::BAD_REQUEST, "PHOTO_REQUIRED"),
            KioskError::ReviewNoteRequired { .. } => {
                (StatusCode::BAD_REQUEST, "REVIEW_NOTE_REQUIRED")
            }
            KioskError::RecordNotFound { .. } => (StatusCode::NOT_FOUND, "RECORD_NOT_FOUND"),
            KioskError::RecordAlreadyReviewed { .. } => {
                (StatusCode::CONFLICT, "RECORD_ALREADY_REVIEWED")
            }
            KioskError::CheckInNotFound { .. } => (StatusCode::NOT_FOUND, "CHECK_IN_NOT_FOUND"),
            KioskError::SubmissionCancelled => (StatusCode::CONFLICT, "SUBMISSION_CANCELLED"),
            KioskError::SubmissionTimedOut { .. } => {
                (StatusCode::GATEWAY_TIMEOUT, "SUBMISSION_TIMED_OUT")
            }
            KioskError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            KioskError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            KioskError::PasswordHash { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            KioskError::ConfigNotFound { .. } | KioskError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}

/// Response body for `POST /admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for admin routes.
    pub token: String,
}

/// Response body for `GET /kiosk/late-penalty`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatePenaltyResponse {
    /// The time the preview was computed for.
    pub time: ClockTime,
    /// Minutes late.
    pub late_minutes: u32,
    /// Penalty owed.
    pub late_penalty: u64,
}

impl LatePenaltyResponse {
    /// Builds the response from a computed penalty.
    pub fn new(time: ClockTime, result: LatePenaltyResult) -> Self {
        Self {
            time,
            late_minutes: result.late_minutes,
            late_penalty: result.late_penalty,
        }
    }
}
