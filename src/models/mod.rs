//! Core data models for the attendance kiosk.
//!
//! This module contains all the domain models used throughout the kiosk.

mod attendance;
mod clock_time;
mod employee;

pub use attendance::{
    AttendanceRecord, LedgerSummary, NewAttendanceRecord, RecordFilter, RecordStatus,
    RecordUpdate,
};
pub use clock_time::{ClockTime, Photo};
pub use employee::{Employee, EmployeeProfile, NewEmployee};
