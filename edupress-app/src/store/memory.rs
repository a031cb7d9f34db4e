//! In-memory storage implementations

use std::collections::HashMap;
use std::sync::RwLock;

use edupress_core::Session;

use super::{Account, AccountStore, PendingReset, SnapshotStore, StoreResult};
use crate::error::AppError;
use crate::fixtures;

/// In-memory account directory
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
    pending: RwLock<HashMap<String, PendingReset>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            pending: RwLock::new(HashMap::new()),
        }
    }

    /// Directory seeded with the admin, teacher and student demo accounts
    pub fn with_demo_accounts() -> Self {
        let store = Self::new();
        {
            let mut accounts = store.accounts.write().unwrap();
            for account in fixtures::demo_accounts() {
                accounts.insert(account.email().to_lowercase(), account);
            }
        }
        store
    }

    /// Backdate a pending reset (for testing purposes)
    pub fn set_reset_created_at(
        &self,
        code: &str,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> StoreResult<()> {
        let mut pending = self.pending.write().unwrap();
        match pending.get_mut(code) {
            Some(p) => {
                p.created_at = created_at;
                Ok(())
            }
            None => Err(AppError::InvalidResetCode),
        }
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create_account(&self, account: Account) -> StoreResult<()> {
        let normalized = account.email().to_lowercase();
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(&normalized) {
            return Err(AppError::AccountExists);
        }
        accounts.insert(normalized, account);
        Ok(())
    }

    fn get_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let normalized = email.trim().to_lowercase();
        Ok(self.accounts.read().unwrap().get(&normalized).cloned())
    }

    fn save_profile(&self, profile: &Session) -> StoreResult<()> {
        let normalized = profile.email.to_lowercase();
        let mut accounts = self.accounts.write().unwrap();
        match accounts.get_mut(&normalized) {
            Some(account) => {
                account.profile = profile.clone();
                Ok(())
            }
            None => Err(AppError::NotFound),
        }
    }

    fn update_password(&self, email: &str, password_hash: &str) -> StoreResult<()> {
        let normalized = email.to_lowercase();
        let mut accounts = self.accounts.write().unwrap();
        match accounts.get_mut(&normalized) {
            Some(account) => {
                account.password_hash = Some(password_hash.to_string());
                Ok(())
            }
            None => Err(AppError::NotFound),
        }
    }

    fn create_pending_reset(&self, pending: PendingReset) -> StoreResult<()> {
        self.pending
            .write()
            .unwrap()
            .insert(pending.code.clone(), pending);
        Ok(())
    }

    fn get_pending_reset(&self, code: &str) -> StoreResult<Option<PendingReset>> {
        Ok(self.pending.read().unwrap().get(code).cloned())
    }

    fn delete_pending_reset(&self, code: &str) -> StoreResult<()> {
        self.pending.write().unwrap().remove(code);
        Ok(())
    }

    fn has_pending_reset(&self, email: &str) -> StoreResult<bool> {
        let normalized = email.to_lowercase();
        let pending = self.pending.read().unwrap();
        Ok(pending.values().any(|p| p.email.to_lowercase() == normalized))
    }
}

/// In-memory snapshot store, lost when the process exits
pub struct InMemorySnapshotStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accounts_seeded() {
        let store = InMemoryAccountStore::with_demo_accounts();

        let admin = store.get_by_email("ADMIN@edupress.com").unwrap();
        assert!(admin.is_some());
        assert!(admin.unwrap().password_hash.is_none());
        assert!(store.get_by_email("nobody@edupress.com").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let store = InMemoryAccountStore::with_demo_accounts();
        let mut account = store.get_by_email("teacher@edupress.com").unwrap().unwrap();
        account.profile.email = "Teacher@EduPress.com".to_string();

        assert!(matches!(
            store.create_account(account),
            Err(AppError::AccountExists)
        ));
    }

    #[test]
    fn test_save_profile_requires_account() {
        let store = InMemoryAccountStore::new();
        let profile = fixtures::demo_accounts().remove(0).profile;
        assert!(matches!(store.save_profile(&profile), Err(AppError::NotFound)));
    }

    #[test]
    fn test_pending_reset_lifecycle() {
        let store = InMemoryAccountStore::new();
        store
            .create_pending_reset(PendingReset {
                code: "123456".to_string(),
                email: "a@example.com".to_string(),
                created_at: chrono::Utc::now(),
            })
            .unwrap();

        assert!(store.has_pending_reset("A@example.com").unwrap());
        assert!(store.get_pending_reset("123456").unwrap().is_some());

        store.delete_pending_reset("123456").unwrap();
        assert!(!store.has_pending_reset("a@example.com").unwrap());
    }

    #[test]
    fn test_snapshot_lifecycle() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load("k").unwrap().is_none());

        store.save("k", "v1").unwrap();
        store.save("k", "v2").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.load("k").unwrap().is_none());
    }
}
