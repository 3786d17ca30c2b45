//! Attendance record model and its review status.
//!
//! An [`AttendanceRecord`] is created on check-in with status
//! [`RecordStatus::Pending`], gains a check-out time and photo later, and is
//! finally approved or rejected by an administrator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::clock_time::{ClockTime, Photo};

/// Review status of an attendance record.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Awaiting administrative review.
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Refused by an administrator, with a reason.
    Rejected,
}

impl RecordStatus {
    /// The lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Approved => "approved",
            RecordStatus::Rejected => "rejected",
        }
    }

    /// Returns true once a review decision has been made.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RecordStatus::Pending)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(RecordStatus::Pending),
            "approved" => Ok(RecordStatus::Approved),
            "rejected" => Ok(RecordStatus::Rejected),
            other => Err(format!("unknown record status: {}", other)),
        }
    }
}

/// One attendance entry for an employee on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier assigned at creation.
    pub id: String,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// Employee name copied at creation time.
    pub employee_name: String,
    /// The logical attendance day.
    pub date: NaiveDate,
    /// Time of check-in.
    pub check_in_time: ClockTime,
    /// Time of check-out, once it happens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<ClockTime>,
    /// Photo captured at check-in.
    #[serde(default)]
    pub check_in_photo: Photo,
    /// Photo captured at check-out, once it happens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_photo: Option<Photo>,
    /// Review status.
    pub status: RecordStatus,
    /// Note attached by the reviewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_note: Option<String>,
    /// Minutes past the work start at check-in.
    pub late_minutes: u32,
    /// Penalty owed for `late_minutes`.
    pub late_penalty: u64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Merges the fields present in `update` into this record.
    pub fn apply(&mut self, update: RecordUpdate) {
        if let Some(time) = update.check_out_time {
            self.check_out_time = Some(time);
        }
        if let Some(photo) = update.check_out_photo {
            self.check_out_photo = Some(photo);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(note) = update.reviewer_note {
            self.reviewer_note = Some(note);
        }
    }

    /// Returns true if the employee has checked out.
    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }
}

/// The caller-supplied part of a new attendance record.
///
/// The ledger assigns `id`, `created_at`, and the initial `pending` status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttendanceRecord {
    /// The employee checking in.
    pub employee_id: String,
    /// The employee's current name.
    pub employee_name: String,
    /// The attendance day.
    pub date: NaiveDate,
    /// Check-in time.
    pub check_in_time: ClockTime,
    /// Check-in photo.
    #[serde(default)]
    pub check_in_photo: Photo,
    /// Minutes late at check-in.
    #[serde(default)]
    pub late_minutes: u32,
    /// Penalty for the late minutes.
    #[serde(default)]
    pub late_penalty: u64,
}

/// A partial update merged into an existing record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    /// New check-out time.
    pub check_out_time: Option<ClockTime>,
    /// New check-out photo.
    pub check_out_photo: Option<Photo>,
    /// New review status.
    pub status: Option<RecordStatus>,
    /// New reviewer note.
    pub reviewer_note: Option<String>,
}

impl RecordUpdate {
    /// An update attaching check-out details.
    pub fn check_out(time: ClockTime, photo: Photo) -> Self {
        Self {
            check_out_time: Some(time),
            check_out_photo: Some(photo),
            ..Self::default()
        }
    }

    /// An update applying a review decision.
    pub fn review(status: RecordStatus, note: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            reviewer_note: Some(note.into()),
            ..Self::default()
        }
    }
}

/// Criteria for the admin record list. Absent criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Only records with this status.
    #[serde(default)]
    pub status: Option<RecordStatus>,
    /// Only records for this day.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Only records for this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
}

impl RecordFilter {
    /// Returns true if `record` satisfies every present criterion.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.status.is_none_or(|status| record.status == status)
            && self.date.is_none_or(|date| record.date == date)
            && self
                .employee_id
                .as_deref()
                .is_none_or(|id| record.employee_id == id)
    }
}

/// Dashboard figures over the whole ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Records awaiting review.
    pub pending: usize,
    /// Approved records.
    pub approved: usize,
    /// Rejected records.
    pub rejected: usize,
    /// Sum of `late_penalty` across all records.
    pub total_penalty: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> AttendanceRecord {
        AttendanceRecord {
            id: "rec_1".to_string(),
            employee_id: "1".to_string(),
            employee_name: "Somchai".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 29).unwrap(),
            check_in_time: ClockTime::new(8, 15).unwrap(),
            check_out_time: None,
            check_in_photo: Photo::default(),
            check_out_photo: None,
            status: RecordStatus::Pending,
            reviewer_note: None,
            late_minutes: 15,
            late_penalty: 30,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&RecordStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&RecordStatus::Rejected).unwrap(),
            "\"rejected\""
        );
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("Approved".parse::<RecordStatus>(), Ok(RecordStatus::Approved));
        assert!("all".parse::<RecordStatus>().is_err());
    }

    #[test]
    fn test_only_pending_is_non_terminal() {
        assert!(!RecordStatus::Pending.is_terminal());
        assert!(RecordStatus::Approved.is_terminal());
        assert!(RecordStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_apply_check_out_update() {
        let mut record = create_test_record();
        record.apply(RecordUpdate::check_out(
            ClockTime::new(17, 30).unwrap(),
            Photo::new("out.jpg"),
        ));

        assert!(record.is_checked_out());
        assert_eq!(record.check_out_photo, Some(Photo::new("out.jpg")));
        assert_eq!(record.status, RecordStatus::Pending);
    }

    #[test]
    fn test_apply_leaves_absent_fields_untouched() {
        let mut record = create_test_record();
        let before = record.clone();
        record.apply(RecordUpdate::default());
        assert_eq!(record, before);
    }

    #[test]
    fn test_filter_combines_criteria() {
        let record = create_test_record();

        assert!(RecordFilter::default().matches(&record));
        assert!(
            RecordFilter {
                status: Some(RecordStatus::Pending),
                date: NaiveDate::from_ymd_opt(2025, 11, 29),
                employee_id: Some("1".to_string()),
            }
            .matches(&record)
        );
        assert!(
            !RecordFilter {
                status: Some(RecordStatus::Pending),
                date: NaiveDate::from_ymd_opt(2025, 11, 30),
                employee_id: None,
            }
            .matches(&record)
        );
    }

    #[test]
    fn test_record_serialization_omits_missing_check_out() {
        let record = create_test_record();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["check_in_time"], "08:15");
        assert_eq!(json["date"], "2025-11-29");
        assert_eq!(json["status"], "pending");
        assert!(json.get("check_out_time").is_none());
        assert!(json.get("reviewer_note").is_none());
    }
}
