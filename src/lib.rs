//! Attendance kiosk with photo check-in and late penalties.
//!
//! Employees identify at a kiosk with a 6-digit PIN and check in or out with
//! a photo. Late check-ins accrue a per-minute penalty, and every record
//! waits in a pending state until an admin approves or rejects it.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod submission;
