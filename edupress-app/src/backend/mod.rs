//! The remote backend collaborator
//!
//! An opaque service exposing course, lesson, profile, enrollment and
//! testimonial tables. The app never depends on it being reachable.

pub mod offline;
pub mod rest;

pub use offline::OfflineBackend;
pub use rest::RestBackend;

use async_trait::async_trait;
use edupress_core::{
    Course, CourseFilter, EnrolledCourse, Lesson, NewCourse, NewTestimonial, Progress, Testimonial,
};
use thiserror::Error;

/// Why a backend call did not produce data
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("No backend configured")]
    Unconfigured,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    Schema(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Courses matching `filter`, newest first
    async fn list_courses(&self, filter: &CourseFilter) -> BackendResult<Vec<Course>>;

    async fn get_course(&self, id: &str) -> BackendResult<Option<Course>>;

    /// Lessons of a course in ascending order
    async fn list_lessons(&self, course_id: &str) -> BackendResult<Vec<Lesson>>;

    async fn get_lesson(&self, id: &str) -> BackendResult<Option<Lesson>>;

    /// Testimonials, newest first
    async fn list_testimonials(&self) -> BackendResult<Vec<Testimonial>>;

    async fn list_enrollments(&self, user_id: &str) -> BackendResult<Vec<EnrolledCourse>>;

    async fn insert_enrollment(&self, user_id: &str, course_id: &str) -> BackendResult<()>;

    async fn update_progress(
        &self,
        user_id: &str,
        course_id: &str,
        progress: Progress,
    ) -> BackendResult<()>;

    async fn insert_course(
        &self,
        instructor_id: &str,
        instructor_name: &str,
        course: &NewCourse,
    ) -> BackendResult<Course>;

    async fn insert_testimonial(
        &self,
        user_id: &str,
        testimonial: &NewTestimonial,
    ) -> BackendResult<()>;
}

/// Allow using Box<dyn Backend> as a Backend
#[async_trait]
impl Backend for Box<dyn Backend> {
    async fn list_courses(&self, filter: &CourseFilter) -> BackendResult<Vec<Course>> {
        (**self).list_courses(filter).await
    }

    async fn get_course(&self, id: &str) -> BackendResult<Option<Course>> {
        (**self).get_course(id).await
    }

    async fn list_lessons(&self, course_id: &str) -> BackendResult<Vec<Lesson>> {
        (**self).list_lessons(course_id).await
    }

    async fn get_lesson(&self, id: &str) -> BackendResult<Option<Lesson>> {
        (**self).get_lesson(id).await
    }

    async fn list_testimonials(&self) -> BackendResult<Vec<Testimonial>> {
        (**self).list_testimonials().await
    }

    async fn list_enrollments(&self, user_id: &str) -> BackendResult<Vec<EnrolledCourse>> {
        (**self).list_enrollments(user_id).await
    }

    async fn insert_enrollment(&self, user_id: &str, course_id: &str) -> BackendResult<()> {
        (**self).insert_enrollment(user_id, course_id).await
    }

    async fn update_progress(
        &self,
        user_id: &str,
        course_id: &str,
        progress: Progress,
    ) -> BackendResult<()> {
        (**self).update_progress(user_id, course_id, progress).await
    }

    async fn insert_course(
        &self,
        instructor_id: &str,
        instructor_name: &str,
        course: &NewCourse,
    ) -> BackendResult<Course> {
        (**self)
            .insert_course(instructor_id, instructor_name, course)
            .await
    }

    async fn insert_testimonial(
        &self,
        user_id: &str,
        testimonial: &NewTestimonial,
    ) -> BackendResult<()> {
        (**self).insert_testimonial(user_id, testimonial).await
    }
}
