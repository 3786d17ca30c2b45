//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the kiosk
//! configuration and seed data from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::LatePolicy;
use crate::error::{KioskError, KioskResult};
use crate::store::{AttendanceLedger, AttendanceStore, EmployeeDirectory};

use super::types::{
    AdminSettings, EmployeesConfig, KioskConfig, KioskSettings, RecordsConfig, ServerSettings,
    SubmissionSettings,
};

/// Loads and provides access to the kiosk configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── kiosk.yaml      # Late policy, submission timing, server, admin
/// ├── employees.yaml  # Seeded employee directory
/// └── records.yaml    # Seeded attendance records (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_kiosk::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let store = loader.build_store();
/// println!("Loaded {} employees", store.directory().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: KioskConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `kiosk.yaml` or `employees.yaml` is missing, or if
    /// any present file contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> KioskResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<KioskSettings>(&path.join("kiosk.yaml"))?;
        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?;

        let records_path = path.join("records.yaml");
        let records = if records_path.exists() {
            Self::load_yaml::<RecordsConfig>(&records_path)?
        } else {
            RecordsConfig::default()
        };

        let config = KioskConfig::new(settings, employees.employees, records.records);
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: KioskConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> KioskResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| KioskError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| KioskError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying kiosk configuration.
    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    /// Returns the late-penalty policy.
    pub fn late_policy(&self) -> &LatePolicy {
        &self.config.settings().late_policy
    }

    /// Returns the submission timing.
    pub fn submission(&self) -> SubmissionSettings {
        self.config.settings().submission
    }

    /// Returns the admin credential settings.
    pub fn admin(&self) -> &AdminSettings {
        &self.config.settings().admin
    }

    /// Returns the HTTP server settings.
    pub fn server(&self) -> &ServerSettings {
        &self.config.settings().server
    }

    /// Replaces the configured admin password hash.
    pub fn with_admin_password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.config.settings_mut().admin.password_hash = Some(password_hash.into());
        self
    }

    /// Builds a fresh store holding the seeded employees and records.
    pub fn build_store(&self) -> AttendanceStore {
        AttendanceStore::new(
            EmployeeDirectory::new(self.config.employees().to_vec()),
            AttendanceLedger::new(self.config.records().to_vec()),
        )
        .with_default_approval_note(self.config.settings().default_approval_note.clone())
    }
}
