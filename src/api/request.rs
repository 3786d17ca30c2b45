//! Request types for the attendance kiosk API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ClockTime, RecordFilter, RecordStatus};

use super::response::ApiError;

/// Request body for `POST /kiosk/verify-pin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPinRequest {
    /// The PIN typed at the kiosk.
    pub pin: String,
}

/// Query string for `GET /kiosk/late-penalty`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatePenaltyQuery {
    /// Hour override.
    #[serde(default)]
    pub hour: Option<u32>,
    /// Minute override.
    #[serde(default)]
    pub minute: Option<u32>,
}

impl LatePenaltyQuery {
    /// The override time, if both parts were given.
    pub fn time(&self) -> Result<Option<ClockTime>, ApiError> {
        match (self.hour, self.minute) {
            (None, None) => Ok(None),
            (Some(hour), Some(minute)) => ClockTime::new(hour, minute)
                .map(Some)
                .map_err(|e| ApiError::new("INVALID_TIME", e.to_string())),
            _ => Err(ApiError::validation_error(
                "hour and minute must be supplied together",
            )),
        }
    }
}

/// Request body for `POST /admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

/// Request body for approve and reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Reviewer note; required for rejection.
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for `PUT /admin/employees/{id}/pin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePinRequest {
    /// The new 6-digit PIN.
    pub pin: String,
}

/// Query string for `GET /admin/records`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordQuery {
    /// `pending`, `approved`, `rejected`, or `all`.
    #[serde(default)]
    pub status: Option<String>,
    /// Attendance day.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Employee id.
    #[serde(default)]
    pub employee_id: Option<String>,
}

impl TryFrom<RecordQuery> for RecordFilter {
    type Error = ApiError;

    fn try_from(query: RecordQuery) -> Result<Self, Self::Error> {
        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(status) => Some(
                status
                    .parse::<RecordStatus>()
                    .map_err(|message| {
                        ApiError::with_details(
                            "VALIDATION_ERROR",
                            message,
                            "status must be one of: pending, approved, rejected, all",
                        )
                    })?,
            ),
        };

        Ok(RecordFilter {
            status,
            date: query.date,
            employee_id: query.employee_id.filter(|id| !id.is_empty()),
        })
    }
}
