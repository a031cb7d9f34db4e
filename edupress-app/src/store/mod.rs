//! Storage abstractions for the app

pub mod memory;
pub mod models;
pub mod sqlite;

pub use memory::{InMemoryAccountStore, InMemorySnapshotStore};
pub use models::*;
pub use sqlite::SqliteSnapshotStore;

use edupress_core::Session;

use crate::error::AppError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, AppError>;

/// Trait for the account directory
pub trait AccountStore: Send + Sync {
    /// Register a new account; fails if the email is taken
    fn create_account(&self, account: Account) -> StoreResult<()>;

    /// Get an account by email address (case-insensitive)
    fn get_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    /// Replace the stored profile of an existing account
    fn save_profile(&self, profile: &Session) -> StoreResult<()>;

    /// Replace the password hash of an existing account
    fn update_password(&self, email: &str, password_hash: &str) -> StoreResult<()>;

    /// Store a pending password reset
    fn create_pending_reset(&self, pending: PendingReset) -> StoreResult<()>;

    /// Get a pending password reset by code
    fn get_pending_reset(&self, code: &str) -> StoreResult<Option<PendingReset>>;

    /// Delete a pending password reset
    fn delete_pending_reset(&self, code: &str) -> StoreResult<()>;

    /// Whether a password reset is pending for an email
    fn has_pending_reset(&self, email: &str) -> StoreResult<bool>;
}

/// Trait for durable client-side key/value storage
pub trait SnapshotStore: Send + Sync {
    /// Read the value stored under `key`
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Allow using Box<dyn SnapshotStore> as a SnapshotStore
impl SnapshotStore for Box<dyn SnapshotStore> {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
