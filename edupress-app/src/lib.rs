//! EduPress App
//!
//! The headless EduPress client: one signed-in user, role-gated views, and a
//! course catalog that keeps working when the remote backend does not.

pub mod auth;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod crypto;
pub mod email;
pub mod error;
pub mod fallback;
pub mod fixtures;
pub mod routes;
pub mod state;
pub mod store;

pub use auth::{AuthEvent, AuthManager, Notice, Outcome, SESSION_KEY};
pub use backend::{Backend, BackendError, OfflineBackend, RestBackend};
pub use catalog::Catalog;
pub use config::{BackendConfig, Config};
pub use email::{ConsoleEmailSender, EmailSender};
pub use error::AppError;
pub use fallback::{with_fallback, Fetched, Source};
pub use state::AppState;
pub use store::{
    AccountStore, InMemoryAccountStore, InMemorySnapshotStore, SnapshotStore, SqliteSnapshotStore,
};
