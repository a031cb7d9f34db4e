//! Session and authentication manager
//!
//! Holds the one active session of this client, persists it to local storage
//! after every change, and rehydrates it at startup. Operations return an
//! [`Outcome`] describing what happened; presenting it is left to the caller.

use std::sync::RwLock;

use chrono::Utc;
use edupress_core::{ProfileUpdate, Role, Session};
use serde::Serialize;

use crate::crypto::{self, generate_reset_code, hash_password, verify_password};
use crate::email::EmailSender;
use crate::error::AppError;
use crate::fixtures;
use crate::store::{Account, AccountStore, PendingReset, SnapshotStore};

/// Local storage key of the session snapshot
pub const SESSION_KEY: &str = "edupress_user";

/// Minimum password length
const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum password length
const MAX_PASSWORD_LENGTH: usize = 80;
/// Reset codes expire after this many minutes
const RESET_EXPIRY_MINUTES: i64 = 15;

/// What an auth operation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn { full_name: String },
    SignedUp { full_name: String },
    LoggedOut,
    ProfileUpdated,
    ResetRequested { email: String },
    PasswordReset,
}

/// User-facing message for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl AuthEvent {
    pub fn notice(&self) -> Notice {
        let (title, message) = match self {
            AuthEvent::LoggedIn { full_name } => {
                ("Login successful", format!("Welcome back, {full_name}!"))
            }
            AuthEvent::SignedUp { full_name } => {
                ("Account created", format!("Welcome to EduPress, {full_name}!"))
            }
            AuthEvent::LoggedOut => ("Logged out", "You have been logged out.".to_string()),
            AuthEvent::ProfileUpdated => (
                "Profile updated",
                "Your profile has been updated successfully.".to_string(),
            ),
            AuthEvent::ResetRequested { email } => (
                "Check your email",
                format!("If an account exists for {email}, reset instructions have been sent."),
            ),
            AuthEvent::PasswordReset => (
                "Password reset",
                "Your password has been changed. You can now log in.".to_string(),
            ),
        };
        Notice {
            title: title.to_string(),
            message,
        }
    }
}

/// Result of a successful auth operation
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub event: AuthEvent,
}

impl<T> Outcome<T> {
    fn new(value: T, event: AuthEvent) -> Self {
        Self { value, event }
    }
}

/// The explicit session context handed to every handler
pub struct AuthManager<A, S, E>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
{
    accounts: A,
    snapshots: S,
    email_sender: E,
    current: RwLock<Option<Session>>,
    demo_logins: bool,
    bcrypt_cost: u32,
}

impl<A, S, E> AuthManager<A, S, E>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
{
    /// Create a manager, rehydrating the session snapshot if one is stored.
    ///
    /// A snapshot that cannot be read back as a session (malformed JSON, an
    /// unknown role) is discarded.
    pub fn restore(accounts: A, snapshots: S, email_sender: E) -> Self {
        let current = match snapshots.load(SESSION_KEY) {
            Ok(Some(snapshot)) => match Session::from_snapshot(&snapshot) {
                Ok(session) => {
                    tracing::info!(email = %session.email, role = %session.role, "Restored session");
                    Some(session)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding invalid session snapshot");
                    if let Err(e) = snapshots.remove(SESSION_KEY) {
                        tracing::warn!(error = %e, "Failed to remove invalid session snapshot");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session snapshot");
                None
            }
        };

        Self {
            accounts,
            snapshots,
            email_sender,
            current: RwLock::new(current),
            demo_logins: false,
            bcrypt_cost: crypto::BCRYPT_COST,
        }
    }

    /// Resolve `admin@…`, `teacher@…` and `student@…` to demo accounts
    pub fn with_demo_logins(mut self, enabled: bool) -> Self {
        self.demo_logins = enabled;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    /// The active session, if any
    pub fn current(&self) -> Option<Session> {
        self.current.read().unwrap().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().unwrap().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_teacher(&self) -> bool {
        self.has_role(Role::Teacher)
    }

    pub fn is_student(&self) -> bool {
        self.has_role(Role::Student)
    }

    fn has_role(&self, role: Role) -> bool {
        self.current
            .read()
            .unwrap()
            .as_ref()
            .is_some_and(|s| s.role == role)
    }

    /// Persist `session` and make it the active one
    fn activate(&self, session: Session) -> Result<Session, AppError> {
        let snapshot = session.to_snapshot()?;
        self.snapshots.save(SESSION_KEY, &snapshot)?;
        *self.current.write().unwrap() = Some(session.clone());
        Ok(session)
    }

    fn find_account(&self, email: &str) -> Result<Option<Account>, AppError> {
        if let Some(account) = self.accounts.get_by_email(email)? {
            return Ok(Some(account));
        }
        if !self.demo_logins {
            return Ok(None);
        }
        let Some(account) = fixtures::demo_account_for(email) else {
            return Ok(None);
        };
        match self.accounts.create_account(account.clone()) {
            Ok(()) => {
                tracing::debug!(email = %account.email(), "Provisioned demo account");
                Ok(Some(account))
            }
            // Another login provisioned it first
            Err(AppError::AccountExists) => self.accounts.get_by_email(email),
            Err(e) => Err(e),
        }
    }

    /// Log in with email and password
    pub fn login(&self, email: &str, password: &str) -> Result<Outcome<Session>, AppError> {
        let account = self
            .find_account(email)?
            .ok_or(AppError::InvalidCredentials)?;

        if let Some(hash) = &account.password_hash {
            let valid = verify_password(password, hash)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            if !valid {
                return Err(AppError::InvalidCredentials);
            }
        }

        let mut session = account.profile;
        session.last_login_at = Some(Utc::now());
        self.accounts.save_profile(&session)?;
        let session = self.activate(session)?;

        tracing::info!(email = %session.email, role = %session.role, "User logged in");

        let event = AuthEvent::LoggedIn {
            full_name: session.full_name.clone(),
        };
        Ok(Outcome::new(session, event))
    }

    /// Create an account and log in as it
    pub fn signup(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Outcome<Session>, AppError> {
        let full_name = full_name.trim();
        let email = email.trim().to_lowercase();

        if full_name.is_empty() {
            return Err(AppError::Validation("Full name is required".to_string()));
        }
        if !email.split_once('@').is_some_and(|(l, d)| !l.is_empty() && !d.is_empty()) {
            return Err(AppError::Validation("Invalid email address".to_string()));
        }
        if role == Role::Admin {
            return Err(AppError::Validation(
                "Admin accounts cannot be created by sign-up".to_string(),
            ));
        }
        validate_password(password)?;

        if self.accounts.get_by_email(&email)?.is_some() {
            return Err(AppError::AccountExists);
        }

        let password_hash = hash_password(password, self.bcrypt_cost)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let now = Utc::now();
        let session = Session {
            user_id: crypto::generate_id(),
            email: email.clone(),
            full_name: full_name.to_string(),
            role,
            avatar_url: Some(format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={email}"
            )),
            email_verified: false,
            created_at: now,
            last_login_at: Some(now),
            bio: None,
            website: None,
            location: None,
            social_links: None,
        };

        self.accounts.create_account(Account {
            profile: session.clone(),
            password_hash: Some(password_hash),
        })?;
        let session = self.activate(session)?;

        tracing::info!(email = %session.email, role = %session.role, "User signed up");

        let event = AuthEvent::SignedUp {
            full_name: session.full_name.clone(),
        };
        Ok(Outcome::new(session, event))
    }

    /// Clear the session. Never fails.
    pub fn logout(&self) -> Outcome<()> {
        let previous = self.current.write().unwrap().take();
        if let Err(e) = self.snapshots.remove(SESSION_KEY) {
            tracing::warn!(error = %e, "Failed to remove session snapshot");
        }
        if let Some(session) = previous {
            tracing::info!(email = %session.email, "User logged out");
        }
        Outcome::new((), AuthEvent::LoggedOut)
    }

    /// Merge profile fields into the active session
    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<Outcome<Session>, AppError> {
        let mut session = self.current().ok_or(AppError::NotAuthenticated)?;
        session.apply(update);

        match self.accounts.save_profile(&session) {
            Ok(()) | Err(AppError::NotFound) => {}
            Err(e) => return Err(e),
        }
        let session = self.activate(session)?;

        tracing::info!(email = %session.email, "Profile updated");
        Ok(Outcome::new(session, AuthEvent::ProfileUpdated))
    }

    /// Start a password reset.
    ///
    /// Reports success whether or not the account exists, so callers cannot
    /// probe for registered emails.
    pub fn reset_password(&self, email: &str) -> Outcome<()> {
        let email = email.trim().to_lowercase();
        if let Err(e) = self.stage_reset(&email) {
            tracing::warn!(email = %email, error = %e, "Password reset could not be staged");
        }
        Outcome::new((), AuthEvent::ResetRequested { email })
    }

    fn stage_reset(&self, email: &str) -> Result<(), AppError> {
        if self.accounts.get_by_email(email)?.is_none() {
            tracing::debug!(email = %email, "Password reset requested for unknown email");
            return Ok(());
        }

        let code = generate_reset_code();
        self.accounts.create_pending_reset(PendingReset {
            code: code.clone(),
            email: email.to_string(),
            created_at: Utc::now(),
        })?;

        self.email_sender
            .send_password_reset(email, &code)
            .map_err(AppError::Internal)
    }

    /// Finish a password reset with the emailed code
    pub fn complete_reset(&self, code: &str, new_password: &str) -> Result<Outcome<()>, AppError> {
        validate_password(new_password)?;

        let pending = self
            .accounts
            .get_pending_reset(code)?
            .ok_or(AppError::InvalidResetCode)?;

        let age = Utc::now() - pending.created_at;
        if age.num_minutes() > RESET_EXPIRY_MINUTES {
            self.accounts.delete_pending_reset(code)?;
            return Err(AppError::ResetExpired);
        }

        let password_hash = hash_password(new_password, self.bcrypt_cost)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.accounts.update_password(&pending.email, &password_hash)?;
        self.accounts.delete_pending_reset(code)?;

        tracing::info!(email = %pending.email, "Password reset completed");
        Ok(Outcome::new((), AuthEvent::PasswordReset))
    }
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::PasswordTooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AppError::PasswordTooLong);
    }
    Ok(())
}
