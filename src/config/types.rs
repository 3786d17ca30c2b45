//! Configuration types for the attendance kiosk.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::time::Duration;

use serde::Deserialize;

use crate::auth::DEFAULT_SESSION_TTL_MINUTES;
use crate::calculation::LatePolicy;
use crate::models::{AttendanceRecord, Employee};
use crate::store::DEFAULT_APPROVAL_NOTE;

/// Timing of the simulated commit step of a kiosk submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SubmissionSettings {
    /// Delay before a submission is committed, in milliseconds.
    pub commit_delay_ms: u64,
    /// Upper bound on the whole submission, in milliseconds.
    pub timeout_ms: u64,
}

impl SubmissionSettings {
    /// The commit delay as a [`Duration`].
    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    /// The timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            commit_delay_ms: 1000,
            timeout_ms: 5000,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Admin credential settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminSettings {
    /// Admin login name, compared case-insensitively.
    pub username: String,
    /// Argon2 PHC hash of the admin password. Admin login is disabled when
    /// absent.
    #[serde(default)]
    pub password_hash: Option<String>,
    /// Minutes an admin session stays valid after login.
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: u32,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            username: String::new(),
            password_hash: None,
            session_ttl_minutes: default_session_ttl_minutes(),
        }
    }
}

fn default_session_ttl_minutes() -> u32 {
    DEFAULT_SESSION_TTL_MINUTES
}

/// Contents of `kiosk.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KioskSettings {
    /// Work start and per-minute penalty.
    #[serde(default)]
    pub late_policy: LatePolicy,
    /// Note recorded on approvals that carry none.
    #[serde(default = "default_approval_note")]
    pub default_approval_note: String,
    /// Submission timing.
    #[serde(default)]
    pub submission: SubmissionSettings,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Admin credential.
    #[serde(default)]
    pub admin: AdminSettings,
}

fn default_approval_note() -> String {
    DEFAULT_APPROVAL_NOTE.to_string()
}

/// Contents of `employees.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// Seeded employees.
    pub employees: Vec<Employee>,
}

/// Contents of `records.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsConfig {
    /// Seeded attendance records.
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
}

/// The complete kiosk configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct KioskConfig {
    settings: KioskSettings,
    employees: Vec<Employee>,
    records: Vec<AttendanceRecord>,
}

impl KioskConfig {
    /// Creates a KioskConfig from its component parts.
    pub fn new(
        settings: KioskSettings,
        employees: Vec<Employee>,
        records: Vec<AttendanceRecord>,
    ) -> Self {
        Self {
            settings,
            employees,
            records,
        }
    }

    /// Returns the kiosk settings.
    pub fn settings(&self) -> &KioskSettings {
        &self.settings
    }

    pub(crate) fn settings_mut(&mut self) -> &mut KioskSettings {
        &mut self.settings
    }

    /// Returns the seeded employees.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the seeded attendance records.
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }
}
