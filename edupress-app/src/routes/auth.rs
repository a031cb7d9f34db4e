//! Login, signup, logout and password reset endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use edupress_core::{Role, Session};
use serde::{Deserialize, Serialize};

use crate::auth::Notice;
use crate::backend::Backend;
use crate::email::EmailSender;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{AccountStore, SnapshotStore};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_signup_role")]
    pub role: String,
}

fn default_signup_role() -> String {
    Role::Student.as_str().to_string()
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: Session,
    pub notice: Notice,
}

#[derive(Serialize)]
pub struct NoticeResponse {
    pub success: bool,
    pub notice: Notice,
}

/// POST /api/login
pub async fn login<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let outcome = state.auth.login(&req.email, &req.password)?;

    Ok(Json(SessionResponse {
        success: true,
        notice: outcome.event.notice(),
        user: outcome.value,
    }))
}

/// POST /api/signup
pub async fn signup<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<SessionResponse>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let role = Role::parse(&req.role)
        .ok_or_else(|| AppError::Validation(format!("Unknown role: {}", req.role)))?;
    let outcome = state
        .auth
        .signup(&req.full_name, &req.email, &req.password, role)?;

    Ok(Json(SessionResponse {
        success: true,
        notice: outcome.event.notice(),
        user: outcome.value,
    }))
}

/// POST /api/logout
pub async fn logout<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
) -> Json<NoticeResponse>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let outcome = state.auth.logout();

    Json(NoticeResponse {
        success: true,
        notice: outcome.event.notice(),
    })
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

/// POST /api/reset_password
pub async fn reset_password<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Json<NoticeResponse>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let outcome = state.auth.reset_password(&req.email);

    Json(NoticeResponse {
        success: true,
        notice: outcome.event.notice(),
    })
}

#[derive(Deserialize)]
pub struct CompleteResetRequest {
    pub code: String,
    pub password: String,
}

/// POST /api/complete_reset
pub async fn complete_reset<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Json(req): Json<CompleteResetRequest>,
) -> Result<Json<NoticeResponse>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let outcome = state.auth.complete_reset(&req.code, &req.password)?;

    Ok(Json(NoticeResponse {
        success: true,
        notice: outcome.event.notice(),
    }))
}
