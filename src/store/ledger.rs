//! The attendance ledger.
//!
//! Records are kept in insertion order and every query view preserves that
//! order. The ledger performs no referential or duplicate checks: two
//! check-ins for the same employee and day are two records.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{
    AttendanceRecord, LedgerSummary, NewAttendanceRecord, RecordFilter, RecordStatus,
    RecordUpdate,
};

/// In-memory attendance records.
#[derive(Debug, Clone, Default)]
pub struct AttendanceLedger {
    records: Vec<AttendanceRecord>,
}

impl AttendanceLedger {
    /// Creates a ledger seeded with `records`.
    pub fn new(records: Vec<AttendanceRecord>) -> Self {
        Self { records }
    }

    /// Appends a new `pending` record with a fresh id and creation time.
    pub fn add_record(&mut self, new_record: NewAttendanceRecord) -> &AttendanceRecord {
        self.records.push(AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: new_record.employee_id,
            employee_name: new_record.employee_name,
            date: new_record.date,
            check_in_time: new_record.check_in_time,
            check_out_time: None,
            check_in_photo: new_record.check_in_photo,
            check_out_photo: None,
            status: RecordStatus::Pending,
            reviewer_note: None,
            late_minutes: new_record.late_minutes,
            late_penalty: new_record.late_penalty,
            created_at: Utc::now(),
        });

        &self.records[self.records.len() - 1]
    }

    /// Merges `update` into the record with `id`.
    ///
    /// Returns false, changing nothing, when no such record exists.
    pub fn update_record(&mut self, id: &str, update: RecordUpdate) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.apply(update);
                true
            }
            None => false,
        }
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the ledger has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records belonging to `employee_id`.
    pub fn records_by_employee(&self, employee_id: &str) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .collect()
    }

    /// Records for the attendance day `date`.
    pub fn records_by_date(&self, date: NaiveDate) -> Vec<&AttendanceRecord> {
        self.records.iter().filter(|r| r.date == date).collect()
    }

    /// Records in `status`.
    pub fn records_by_status(&self, status: RecordStatus) -> Vec<&AttendanceRecord> {
        self.records.iter().filter(|r| r.status == status).collect()
    }

    /// Records matching every criterion in `filter`.
    pub fn filter(&self, filter: &RecordFilter) -> Vec<&AttendanceRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// The first record for `employee_id` on `date`, which check-out
    /// attaches to.
    pub fn open_record_for(&self, employee_id: &str, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.records
            .iter()
            .find(|r| r.employee_id == employee_id && r.date == date)
    }

    /// Counts by status and the total penalty across the ledger.
    pub fn summary(&self) -> LedgerSummary {
        self.records
            .iter()
            .fold(LedgerSummary::default(), |mut summary, record| {
                match record.status {
                    RecordStatus::Pending => summary.pending += 1,
                    RecordStatus::Approved => summary.approved += 1,
                    RecordStatus::Rejected => summary.rejected += 1,
                }
                summary.total_penalty = summary.total_penalty.saturating_add(record.late_penalty);
                summary
            })
    }

    /// Drops every record for `employee_id`, returning how many were removed.
    pub(super) fn remove_for_employee(&mut self, employee_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.employee_id != employee_id);
        before - self.records.len()
    }
}
