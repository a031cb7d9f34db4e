//! Application state shared by the HTTP handlers

use crate::auth::AuthManager;
use crate::backend::Backend;
use crate::catalog::Catalog;
use crate::email::EmailSender;
use crate::store::{AccountStore, SnapshotStore};

/// Application state
pub struct AppState<A, S, E, B>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    /// The client's session context
    pub auth: AuthManager<A, S, E>,
    /// Course data with fixture fallback
    pub catalog: Catalog<B>,
}

impl<A, S, E, B> AppState<A, S, E, B>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    pub fn new(auth: AuthManager<A, S, E>, backend: B) -> Self {
        Self {
            auth,
            catalog: Catalog::new(backend),
        }
    }
}
