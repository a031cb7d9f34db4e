//! Common test utilities for app integration tests

use std::sync::Arc;
use std::sync::RwLock;

use axum::Router;
use axum_test::TestServer;
use edupress_app::{
    routes, AppState, AuthManager, Backend, EmailSender, InMemoryAccountStore,
    InMemorySnapshotStore, OfflineBackend,
};
use serde_json::{json, Value};

/// Mock email sender that captures reset codes
#[derive(Default, Clone)]
pub struct MockEmailSender {
    /// Captured (email, code) pairs
    pub sent: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get the last reset code sent to an email
    pub fn get_code(&self, email: &str) -> Option<String> {
        self.sent
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|(e, _)| e == email)
            .map(|(_, c)| c.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

impl EmailSender for MockEmailSender {
    fn send_password_reset(&self, email: &str, code: &str) -> Result<(), String> {
        self.sent
            .write()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

pub type TestState<B> = AppState<InMemoryAccountStore, InMemorySnapshotStore, MockEmailSender, B>;

/// Build app state over in-memory stores and the given backend
pub fn create_state<B: Backend>(backend: B, email_sender: MockEmailSender) -> Arc<TestState<B>> {
    let auth = AuthManager::restore(
        InMemoryAccountStore::with_demo_accounts(),
        InMemorySnapshotStore::new(),
        email_sender,
    )
    .with_demo_logins(true)
    .with_bcrypt_cost(4);

    Arc::new(AppState::new(auth, backend))
}

/// Build the app router over in-memory stores and the given backend
pub fn create_app<B: Backend + 'static>(backend: B, email_sender: MockEmailSender) -> Router {
    routes::create_router(create_state(backend, email_sender))
}

/// Create a test server in demo mode with mock email sender
pub fn create_test_server() -> (TestServer, MockEmailSender) {
    let (server, email_sender, _) = create_test_server_with_state();
    (server, email_sender)
}

/// Like `create_test_server`, also returning the state for direct store access
pub fn create_test_server_with_state() -> (TestServer, MockEmailSender, Arc<TestState<OfflineBackend>>) {
    let email_sender = MockEmailSender::new();
    let state = create_state(OfflineBackend, email_sender.clone());
    let app = routes::create_router(state.clone());
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, email_sender, state)
}

/// Log in and return the session user
pub async fn login(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/api/login")
        .json(&json!({
            "email": email,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    body["user"].clone()
}

/// Sign up and return the session user
pub async fn signup(server: &TestServer, name: &str, email: &str, password: &str, role: &str) -> Value {
    let response = server
        .post("/api/signup")
        .json(&json!({
            "full_name": name,
            "email": email,
            "password": password,
            "role": role,
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    body["user"].clone()
}
