//! Role-gated views

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use edupress_core::{authorize_view, Decision, View};
use serde_json::json;

use crate::backend::Backend;
use crate::email::EmailSender;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{AccountStore, SnapshotStore};

/// GET /views/:slug
///
/// 200 when the active session may see the view, otherwise 303 to the login
/// view (carrying the requested path in `from`) or to the user's own home view.
pub async fn get_view<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let view = View::from_slug(&slug).ok_or(AppError::NotFound)?;
    let session = state.auth.current();

    let response = match authorize_view(session.as_ref(), view) {
        Decision::Allow => Json(json!({
            "view": view,
            "path": view.path(),
            "allowed": true,
        }))
        .into_response(),
        Decision::Redirect(to) => {
            tracing::debug!(view = view.slug(), redirect = to.slug(), "View gated");
            let mut body = json!({
                "view": view,
                "allowed": false,
                "redirect": to,
            });
            // The login view is told where to return afterwards
            let location = if to == View::Login {
                body["from"] = json!(view.path());
                format!("{}?from={}", to.path(), view.path())
            } else {
                to.path().to_string()
            };
            (StatusCode::SEE_OTHER, [(header::LOCATION, location)], Json(body)).into_response()
        }
    };
    Ok(response)
}
