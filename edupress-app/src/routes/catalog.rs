//! Course, lesson, enrollment and testimonial endpoints
//!
//! Reads answer with `{source, data}`; `source` says whether the data came
//! from the backend or from fixtures.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use edupress_core::{
    Course, CourseFilter, EnrolledCourse, Lesson, NewCourse, NewTestimonial, Progress, RoleSet,
    Testimonial,
};
use serde::{Deserialize, Serialize};

use super::require_roles;
use crate::backend::Backend;
use crate::email::EmailSender;
use crate::error::AppError;
use crate::fallback::{Fetched, Source};
use crate::state::AppState;
use crate::store::{AccountStore, SnapshotStore};

#[derive(Serialize)]
pub struct WriteResponse {
    pub success: bool,
    pub source: Source,
}

impl WriteResponse {
    fn new(source: Source) -> Self {
        Self {
            success: true,
            source,
        }
    }
}

/// A fetched optional record, or 404
fn found<T>(fetched: Fetched<Option<T>>) -> Result<Json<Fetched<T>>, AppError> {
    let source = fetched.source;
    match fetched.data {
        Some(data) => Ok(Json(Fetched { source, data })),
        None => Err(AppError::NotFound),
    }
}

/// GET /api/courses?category=&search=
pub async fn list_courses<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Query(filter): Query<CourseFilter>,
) -> Json<Fetched<Vec<Course>>>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    Json(state.catalog.courses(&filter).await)
}

/// GET /api/courses/:id
pub async fn get_course<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(id): Path<String>,
) -> Result<Json<Fetched<Course>>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    found(state.catalog.course(&id).await)
}

/// GET /api/courses/:id/lessons
pub async fn list_lessons<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(course_id): Path<String>,
) -> Json<Fetched<Vec<Lesson>>>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    Json(state.catalog.lessons(&course_id).await)
}

/// GET /api/lessons/:id
pub async fn get_lesson<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(id): Path<String>,
) -> Result<Json<Fetched<Lesson>>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    found(state.catalog.lesson(&id).await)
}

/// GET /api/lessons/:id/next
///
/// `data` is null on the last lesson of a course.
pub async fn next_lesson<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(id): Path<String>,
) -> Result<Json<Fetched<Option<Lesson>>>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let current = state
        .catalog
        .lesson(&id)
        .await
        .into_inner()
        .ok_or(AppError::NotFound)?;
    Ok(Json(
        state
            .catalog
            .next_lesson(&current.course_id, current.order)
            .await,
    ))
}

/// GET /api/lessons/:id/previous
pub async fn previous_lesson<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(id): Path<String>,
) -> Result<Json<Fetched<Option<Lesson>>>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let current = state
        .catalog
        .lesson(&id)
        .await
        .into_inner()
        .ok_or(AppError::NotFound)?;
    Ok(Json(
        state
            .catalog
            .previous_lesson(&current.course_id, current.order)
            .await,
    ))
}

/// GET /api/testimonials
pub async fn list_testimonials<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
) -> Json<Fetched<Vec<Testimonial>>>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    Json(state.catalog.testimonials().await)
}

/// POST /api/testimonials
pub async fn add_testimonial<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Json(testimonial): Json<NewTestimonial>,
) -> Result<Json<WriteResponse>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let user = require_roles(&state.auth, RoleSet::ANY)?;
    let source = state
        .catalog
        .add_testimonial(&user.user_id, testimonial)
        .await?;
    Ok(Json(WriteResponse::new(source)))
}

#[derive(Serialize)]
pub struct CreateCourseResponse {
    pub success: bool,
    #[serde(flatten)]
    pub course: Fetched<Course>,
}

/// POST /api/courses
pub async fn create_course<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Json(course): Json<NewCourse>,
) -> Result<Json<CreateCourseResponse>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let instructor = require_roles(&state.auth, RoleSet::STAFF)?;
    if course.title.trim().is_empty() {
        return Err(AppError::Validation("Course title is required".to_string()));
    }

    let course = state
        .catalog
        .create_course(&instructor.user_id, &instructor.full_name, course)
        .await;
    tracing::info!(
        course_id = %course.data.id,
        instructor = %instructor.email,
        source = ?course.source,
        "Course created"
    );

    Ok(Json(CreateCourseResponse {
        success: true,
        course,
    }))
}

/// POST /api/courses/:id/enroll
pub async fn enroll<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(course_id): Path<String>,
) -> Result<Json<WriteResponse>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let user = require_roles(&state.auth, RoleSet::ANY)?;
    if state.catalog.course(&course_id).await.data.is_none() {
        return Err(AppError::NotFound);
    }

    let source = state.catalog.enroll(&user.user_id, &course_id).await;
    tracing::info!(course_id = %course_id, email = %user.email, "Enrolled in course");
    Ok(Json(WriteResponse::new(source)))
}

/// GET /api/enrollments
pub async fn list_enrollments<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
) -> Result<Json<Fetched<Vec<EnrolledCourse>>>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let user = require_roles(&state.auth, RoleSet::ANY)?;
    Ok(Json(state.catalog.enrolled_courses(&user.user_id).await))
}

#[derive(Deserialize)]
pub struct ProgressRequest {
    pub progress: u8,
}

/// PUT /api/courses/:id/progress
pub async fn update_progress<A, S, E, B>(
    State(state): State<Arc<AppState<A, S, E, B>>>,
    Path(course_id): Path<String>,
    Json(req): Json<ProgressRequest>,
) -> Result<Json<WriteResponse>, AppError>
where
    A: AccountStore,
    S: SnapshotStore,
    E: EmailSender,
    B: Backend,
{
    let user = require_roles(&state.auth, RoleSet::ANY)?;
    let progress = Progress::new(req.progress)?;
    if state.catalog.course(&course_id).await.data.is_none() {
        return Err(AppError::NotFound);
    }

    let source = state
        .catalog
        .update_progress(&user.user_id, &course_id, progress)
        .await;
    Ok(Json(WriteResponse::new(source)))
}
