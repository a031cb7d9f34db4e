//! HTTP routes for the app

mod auth;
mod catalog;
mod quiz;
mod session;
mod views;

use std::sync::Arc;

use axum::routing::{get, patch, post, put};
use axum::Router;
use edupress_core::{authorize, Decision, RoleSet, Session, View};
use tower_http::trace::TraceLayer;

use crate::auth::AuthManager;
use crate::backend::Backend;
use crate::email::EmailSender;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{AccountStore, SnapshotStore};

/// Create the router with all routes
pub fn create_router<A, S, E, B>(state: Arc<AppState<A, S, E, B>>) -> Router
where
    A: AccountStore + 'static,
    S: SnapshotStore + 'static,
    E: EmailSender + 'static,
    B: Backend + 'static,
{
    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/signup", post(auth::signup))
        .route("/api/logout", post(auth::logout))
        .route("/api/reset_password", post(auth::reset_password))
        .route("/api/complete_reset", post(auth::complete_reset))
        .route("/api/session", get(session::get_session))
        .route("/api/profile", patch(session::update_profile))
        .route(
            "/api/courses",
            get(catalog::list_courses).post(catalog::create_course),
        )
        .route("/api/courses/:id", get(catalog::get_course))
        .route("/api/courses/:id/lessons", get(catalog::list_lessons))
        .route("/api/courses/:id/enroll", post(catalog::enroll))
        .route("/api/courses/:id/progress", put(catalog::update_progress))
        .route(
            "/api/courses/:id/quiz",
            get(quiz::get_quiz).post(quiz::submit_quiz),
        )
        .route("/api/lessons/:id", get(catalog::get_lesson))
        .route("/api/lessons/:id/next", get(catalog::next_lesson))
        .route("/api/lessons/:id/previous", get(catalog::previous_lesson))
        .route(
            "/api/testimonials",
            get(catalog::list_testimonials).post(catalog::add_testimonial),
        )
        .route("/api/enrollments", get(catalog::list_enrollments))
        .route("/views/:slug", get(views::get_view))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Gate an API operation on the active session.
///
/// A missing session is `NotAuthenticated`; a session with the wrong role is
/// `Forbidden`.
pub(crate) fn require_roles<A, S, E>(
    auth: &AuthManager<A, S, E>,
    required: RoleSet,
) -> Result<Session, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
{
    let session = auth.current();
    match authorize(session.as_ref(), &required) {
        Decision::Allow => session.ok_or(AppError::NotAuthenticated),
        Decision::Redirect(View::Login) => Err(AppError::NotAuthenticated),
        Decision::Redirect(home) => {
            tracing::debug!(redirect = home.slug(), "Role gate refused API call");
            Err(AppError::Forbidden)
        }
    }
}
