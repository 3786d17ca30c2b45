//! Configuration loading and management for the attendance kiosk.
//!
//! This module loads the late-penalty policy, submission timing, admin
//! credential, and seed data from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_kiosk::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Work starts at {}", config.late_policy().work_start);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AdminSettings, EmployeesConfig, KioskConfig, KioskSettings, RecordsConfig, ServerSettings,
    SubmissionSettings,
};
