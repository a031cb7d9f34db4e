//! Data models for local storage

use chrono::{DateTime, Utc};
use edupress_core::Session;

/// A known account in the local account directory
#[derive(Debug, Clone)]
pub struct Account {
    /// The profile a session is built from
    pub profile: Session,
    /// bcrypt hash; `None` for demo accounts, which accept any password
    pub password_hash: Option<String>,
}

impl Account {
    pub fn email(&self) -> &str {
        &self.profile.email
    }
}

/// A staged password reset
#[derive(Debug, Clone)]
pub struct PendingReset {
    pub code: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
