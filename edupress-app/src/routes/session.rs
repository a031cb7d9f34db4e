//! Session context and profile endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use edupress_core::{ProfileUpdate, Session};
use serde::Serialize;

use super::auth::SessionResponse;
use crate::backend::Backend;
use crate::email::EmailSender;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{AccountStore, SnapshotStore};

#[derive(Serialize)]
pub struct SessionContext {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Session>,
    pub is_admin: bool,
    pub is_teacher: bool,
    pub is_student: bool,
    pub server_time: i64,
}

/// GET /api/session
pub async fn get_session<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
) -> Json<SessionContext>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let user = state.auth.current();

    Json(SessionContext {
        authenticated: user.is_some(),
        is_admin: user.as_ref().is_some_and(Session::is_admin),
        is_teacher: user.as_ref().is_some_and(Session::is_teacher),
        is_student: user.as_ref().is_some_and(Session::is_student),
        user,
        server_time: chrono::Utc::now().timestamp(),
    })
}

/// PATCH /api/profile
pub async fn update_profile<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<SessionResponse>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let outcome = state.auth.update_profile(&update)?;

    Ok(Json(SessionResponse {
        success: true,
        notice: outcome.event.notice(),
        user: outcome.value,
    }))
}
