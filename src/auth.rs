//! Admin credential check and session tokens.
//!
//! A single admin account is configured with an argon2 password hash. A
//! successful login issues an opaque session token that admin operations
//! must present until it expires or is logged out.

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AdminSettings;
use crate::error::{KioskError, KioskResult};

/// Minutes an admin session stays valid when no lifetime is configured.
pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 480;

/// Hashes `password` into an argon2 PHC string suitable for the admin
/// settings.
pub fn hash_password(password: &str) -> KioskResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| KioskError::PasswordHash {
            message: e.to_string(),
        })
}

fn verify_password(password: &str, hashed: &str) -> bool {
    match PasswordHash::new(hashed) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            warn!(error = %err, "Configured admin password hash is malformed");
            false
        }
    }
}

/// The admin username and password hash.
///
/// Cloned out of [`AdminAuth`] so the slow argon2 check can run without
/// holding the session lock.
#[derive(Debug, Clone, Default)]
pub struct AdminCredentials {
    username: String,
    password_hash: Option<String>,
}

impl AdminCredentials {
    /// Creates the credentials. With no hash every check fails.
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            username: username.into().trim().to_lowercase(),
            password_hash,
        }
    }

    /// Returns true when a password hash is configured.
    pub fn is_enabled(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Checks a username and password. Blocks for the duration of the argon2
    /// verification.
    ///
    /// The username is compared trimmed and case-insensitively.
    pub fn verify(&self, username: &str, password: &str) -> KioskResult<()> {
        let username_matches = username.trim().to_lowercase() == self.username;
        let password_matches = self
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(password, hash));

        if username_matches && password_matches {
            Ok(())
        } else {
            warn!("Admin login failed");
            Err(KioskError::InvalidCredentials)
        }
    }
}

/// The admin account and its live sessions.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    credentials: AdminCredentials,
    session_ttl: Duration,
    sessions: HashMap<String, DateTime<Utc>>,
}

impl AdminAuth {
    /// Creates the admin account with the default session lifetime.
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            credentials: AdminCredentials::new(username, password_hash),
            session_ttl: Duration::minutes(i64::from(DEFAULT_SESSION_TTL_MINUTES)),
            sessions: HashMap::new(),
        }
    }

    /// Creates the admin account from configuration.
    pub fn from_settings(settings: &AdminSettings) -> Self {
        Self::new(settings.username.clone(), settings.password_hash.clone())
            .with_session_ttl(Duration::minutes(i64::from(settings.session_ttl_minutes)))
    }

    /// Sets how long a session stays valid after login.
    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    /// Returns true when a password hash is configured.
    pub fn is_enabled(&self) -> bool {
        self.credentials.is_enabled()
    }

    /// The configured credentials.
    pub fn credentials(&self) -> &AdminCredentials {
        &self.credentials
    }

    /// Number of sessions currently held, expired ones included until the
    /// next login prunes them.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Checks the credentials and opens a session.
    ///
    /// Runs argon2 inline; async callers should verify through
    /// [`AdminCredentials::verify`] on a blocking thread and then call
    /// [`AdminAuth::open_session`].
    pub fn login(&mut self, username: &str, password: &str) -> KioskResult<String> {
        self.credentials.verify(username, password)?;
        Ok(self.open_session())
    }

    /// Issues a session token for an already verified admin.
    pub fn open_session(&mut self) -> String {
        self.open_session_at(Utc::now())
    }

    fn open_session_at(&mut self, now: DateTime<Utc>) -> String {
        let before = self.sessions.len();
        self.sessions.retain(|_, expires_at| *expires_at > now);
        let pruned = before - self.sessions.len();
        if pruned > 0 {
            debug!(pruned, "Expired admin sessions pruned");
        }

        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), now + self.session_ttl);
        info!(active_sessions = self.sessions.len(), "Admin logged in");
        token
    }

    /// Checks that `token` belongs to a live, unexpired session.
    pub fn authorize(&self, token: &str) -> KioskResult<()> {
        self.authorize_at(token, Utc::now())
    }

    fn authorize_at(&self, token: &str, now: DateTime<Utc>) -> KioskResult<()> {
        match self.sessions.get(token) {
            Some(expires_at) if *expires_at > now => Ok(()),
            _ => Err(KioskError::Unauthorized),
        }
    }

    /// Ends a session. Unknown tokens are ignored.
    pub fn logout(&mut self, token: &str) -> bool {
        let removed = self.sessions.remove(token).is_some();
        if removed {
            info!(active_sessions = self.sessions.len(), "Admin logged out");
        }
        removed
    }
}

impl Default for AdminAuth {
    fn default() -> Self {
        Self::new(String::new(), None)
    }
}
