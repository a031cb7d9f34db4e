//! Quiz endpoints

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use edupress_core::{Answer, Quiz, QuizResult, RoleSet};
use serde::Deserialize;

use super::require_roles;
use crate::backend::Backend;
use crate::email::EmailSender;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{AccountStore, SnapshotStore};

/// GET /api/courses/:id/quiz
pub async fn get_quiz<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(course_id): Path<String>,
) -> Result<Json<Quiz>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    if state.catalog.course(&course_id).await.data.is_none() {
        return Err(AppError::NotFound);
    }
    Ok(Json(state.catalog.quiz(&course_id)))
}

#[derive(Deserialize)]
pub struct SubmitQuizRequest {
    /// Selected option index, or indexes, per question id
    pub answers: HashMap<String, Answer>,
}

/// POST /api/courses/:id/quiz
pub async fn submit_quiz<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(course_id): Path<String>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<Json<QuizResult>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    require_roles(&state.auth, RoleSet::ANY)?;
    if state.catalog.course(&course_id).await.data.is_none() {
        return Err(AppError::NotFound);
    }
    let result = state.catalog.submit_quiz(&course_id, &req.answers)?;
    Ok(Json(result))
}
