//! Application state for the attendance kiosk API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::AdminAuth;
use crate::config::ConfigLoader;
use crate::submission::{Clock, SharedStore, SubmissionService, SystemClock};

/// Shared application state.
///
/// Owns the attendance store (through the submission service) and the admin
/// sessions.
#[derive(Clone)]
pub struct AppState {
    submissions: SubmissionService,
    auth: Arc<RwLock<AdminAuth>>,
}

impl AppState {
    /// Creates a new application state from its parts.
    pub fn new(submissions: SubmissionService, auth: AdminAuth) -> Self {
        Self {
            submissions,
            auth: Arc::new(RwLock::new(auth)),
        }
    }

    /// Builds the state from loaded configuration using the system clock.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    /// Builds the state from loaded configuration using `clock`.
    pub fn from_config_with_clock(config: &ConfigLoader, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(RwLock::new(config.build_store()));
        let submissions =
            SubmissionService::new(store, clock, *config.late_policy(), config.submission());
        Self::new(submissions, AdminAuth::from_settings(config.admin()))
    }

    /// Returns the submission service.
    pub fn submissions(&self) -> &SubmissionService {
        &self.submissions
    }

    /// Returns the shared attendance store.
    pub fn store(&self) -> &SharedStore {
        self.submissions.store()
    }

    /// Returns the admin sessions.
    pub fn auth(&self) -> &RwLock<AdminAuth> {
        &self.auth
    }
}
