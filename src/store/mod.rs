//! The attendance store: sole owner of the employee directory and the
//! attendance ledger.
//!
//! All mutation goes through [`AttendanceStore`]. Removing an employee
//! cascades to their records, and review decisions follow the
//! `pending → approved | rejected` state machine.

mod directory;
mod ledger;

pub use directory::EmployeeDirectory;
pub use ledger::AttendanceLedger;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{KioskError, KioskResult};
use crate::models::{
    AttendanceRecord, ClockTime, Employee, NewAttendanceRecord, NewEmployee, Photo, RecordStatus,
    RecordUpdate,
};

/// Reviewer note used when an approval carries none.
pub const DEFAULT_APPROVAL_NOTE: &str = "approved";

/// In-memory state for the kiosk.
///
/// # Example
///
/// ```
/// use attendance_kiosk::models::{ClockTime, NewAttendanceRecord, NewEmployee, Photo};
/// use attendance_kiosk::store::AttendanceStore;
/// use chrono::NaiveDate;
///
/// let mut store = AttendanceStore::default();
/// let employee = store
///     .add_employee(NewEmployee {
///         name: "Somchai".to_string(),
///         department: "Production".to_string(),
///         ..NewEmployee::default()
///     })
///     .unwrap();
///
/// let record = store.add_record(NewAttendanceRecord {
///     employee_id: employee.id.clone(),
///     employee_name: employee.name.clone(),
///     date: NaiveDate::from_ymd_opt(2025, 11, 29).unwrap(),
///     check_in_time: ClockTime::new(8, 15).unwrap(),
///     check_in_photo: Photo::new("in.jpg"),
///     late_minutes: 15,
///     late_penalty: 30,
/// });
///
/// let approved = store.approve(&record.id, None).unwrap();
/// assert_eq!(approved.reviewer_note.as_deref(), Some("approved"));
/// ```
#[derive(Debug, Clone)]
pub struct AttendanceStore {
    directory: EmployeeDirectory,
    ledger: AttendanceLedger,
    default_approval_note: String,
}

impl Default for AttendanceStore {
    fn default() -> Self {
        Self::new(EmployeeDirectory::default(), AttendanceLedger::default())
    }
}

impl AttendanceStore {
    /// Creates a store from a directory and a ledger.
    pub fn new(directory: EmployeeDirectory, ledger: AttendanceLedger) -> Self {
        Self {
            directory,
            ledger,
            default_approval_note: DEFAULT_APPROVAL_NOTE.to_string(),
        }
    }

    /// Overrides the note recorded on approvals that carry none.
    pub fn with_default_approval_note(mut self, note: impl Into<String>) -> Self {
        self.default_approval_note = note.into();
        self
    }

    /// Read access to the employee directory.
    pub fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }

    /// Read access to the attendance ledger.
    pub fn ledger(&self) -> &AttendanceLedger {
        &self.ledger
    }

    /// Finds the employee holding `pin`.
    pub fn find_employee_by_pin(&self, pin: &str) -> Option<&Employee> {
        self.directory.find_by_pin(pin)
    }

    /// Adds an employee, returning the stored record.
    pub fn add_employee(&mut self, new_employee: NewEmployee) -> KioskResult<Employee> {
        let employee = self.directory.add(new_employee)?.clone();
        info!(
            employee_id = %employee.id,
            employee_code = %employee.employee_code,
            "Employee added"
        );
        Ok(employee)
    }

    /// Removes an employee and every attendance record that references them.
    ///
    /// Unknown ids are a no-op and return `None`.
    pub fn remove_employee(&mut self, employee_id: &str) -> Option<Employee> {
        let Some(employee) = self.directory.remove(employee_id) else {
            debug!(employee_id = %employee_id, "Remove ignored: employee not found");
            return None;
        };

        let removed_records = self.ledger.remove_for_employee(employee_id);
        info!(
            employee_id = %employee_id,
            removed_records,
            "Employee removed"
        );
        Some(employee)
    }

    /// Rotates an employee's PIN.
    ///
    /// The PIN must be six digits. Unknown ids are a no-op returning
    /// `Ok(false)`.
    pub fn update_employee_pin(&mut self, employee_id: &str, new_pin: &str) -> KioskResult<bool> {
        let updated = self
            .directory
            .update_pin(employee_id, new_pin)
            .inspect_err(|_| warn!(employee_id = %employee_id, "PIN update refused: bad format"))?;

        if updated {
            info!(employee_id = %employee_id, "Employee PIN updated");
        } else {
            debug!(employee_id = %employee_id, "PIN update ignored: employee not found");
        }
        Ok(updated)
    }

    /// Appends a new `pending` attendance record.
    pub fn add_record(&mut self, new_record: NewAttendanceRecord) -> AttendanceRecord {
        let record = self.ledger.add_record(new_record).clone();
        info!(
            record_id = %record.id,
            employee_id = %record.employee_id,
            date = %record.date,
            late_minutes = record.late_minutes,
            late_penalty = record.late_penalty,
            "Attendance record created"
        );
        record
    }

    /// Merges a partial update into a record; unknown ids are a no-op.
    pub fn update_record(&mut self, record_id: &str, update: RecordUpdate) -> bool {
        let updated = self.ledger.update_record(record_id, update);
        if !updated {
            debug!(record_id = %record_id, "Update ignored: record not found");
        }
        updated
    }

    /// Attaches check-out details to the employee's first record on `date`.
    pub fn check_out(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        time: ClockTime,
        photo: Photo,
    ) -> KioskResult<AttendanceRecord> {
        let record_id = self
            .ledger
            .open_record_for(employee_id, date)
            .map(|r| r.id.clone())
            .ok_or_else(|| KioskError::CheckInNotFound {
                employee_id: employee_id.to_string(),
                date: date.to_string(),
            })?;

        self.ledger
            .update_record(&record_id, RecordUpdate::check_out(time, photo));
        info!(
            record_id = %record_id,
            employee_id = %employee_id,
            check_out_time = %time,
            "Check-out recorded"
        );
        self.stored_record(&record_id)
    }

    /// Approves a pending record. A blank or absent note is replaced by the
    /// default approval note.
    pub fn approve(&mut self, record_id: &str, note: Option<&str>) -> KioskResult<AttendanceRecord> {
        let note = match note.map(str::trim) {
            Some(note) if !note.is_empty() => note.to_string(),
            _ => self.default_approval_note.clone(),
        };
        self.review(record_id, RecordStatus::Approved, note)
    }

    /// Rejects a pending record. The note is mandatory; a blank note leaves
    /// the record untouched.
    pub fn reject(&mut self, record_id: &str, note: &str) -> KioskResult<AttendanceRecord> {
        let note = note.trim();
        if note.is_empty() {
            warn!(record_id = %record_id, "Rejection refused: reviewer note missing");
            return Err(KioskError::ReviewNoteRequired {
                record_id: record_id.to_string(),
            });
        }
        self.review(record_id, RecordStatus::Rejected, note.to_string())
    }

    fn review(
        &mut self,
        record_id: &str,
        decision: RecordStatus,
        note: String,
    ) -> KioskResult<AttendanceRecord> {
        let current = self
            .ledger
            .get(record_id)
            .map(|r| r.status)
            .ok_or_else(|| KioskError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;

        if current.is_terminal() {
            warn!(
                record_id = %record_id,
                status = %current,
                "Review refused: record already reviewed"
            );
            return Err(KioskError::RecordAlreadyReviewed {
                record_id: record_id.to_string(),
                status: current.to_string(),
            });
        }

        self.ledger
            .update_record(record_id, RecordUpdate::review(decision, note));
        info!(record_id = %record_id, status = %decision, "Attendance record reviewed");
        self.stored_record(record_id)
    }

    fn stored_record(&self, record_id: &str) -> KioskResult<AttendanceRecord> {
        self.ledger
            .get(record_id)
            .cloned()
            .ok_or_else(|| KioskError::RecordNotFound {
                record_id: record_id.to_string(),
            })
    }
}
