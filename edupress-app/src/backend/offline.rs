//! Backend used when no remote service is configured

use async_trait::async_trait;
use edupress_core::{
    Course, CourseFilter, EnrolledCourse, Lesson, NewCourse, NewTestimonial, Progress, Testimonial,
};

use super::{Backend, BackendError, BackendResult};

/// Every call reports [`BackendError::Unconfigured`], keeping the catalog on
/// fixtures permanently
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineBackend;

impl OfflineBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Backend for OfflineBackend {
    async fn list_courses(&self, _filter: &CourseFilter) -> BackendResult<Vec<Course>> {
        Err(BackendError::Unconfigured)
    }

    async fn get_course(&self, _id: &str) -> BackendResult<Option<Course>> {
        Err(BackendError::Unconfigured)
    }

    async fn list_lessons(&self, _course_id: &str) -> BackendResult<Vec<Lesson>> {
        Err(BackendError::Unconfigured)
    }

    async fn get_lesson(&self, _id: &str) -> BackendResult<Option<Lesson>> {
        Err(BackendError::Unconfigured)
    }

    async fn list_testimonials(&self) -> BackendResult<Vec<Testimonial>> {
        Err(BackendError::Unconfigured)
    }

    async fn list_enrollments(&self, _user_id: &str) -> BackendResult<Vec<EnrolledCourse>> {
        Err(BackendError::Unconfigured)
    }

    async fn insert_enrollment(&self, _user_id: &str, _course_id: &str) -> BackendResult<()> {
        Err(BackendError::Unconfigured)
    }

    async fn update_progress(
        &self,
        _user_id: &str,
        _course_id: &str,
        _progress: Progress,
    ) -> BackendResult<()> {
        Err(BackendError::Unconfigured)
    }

    async fn insert_course(
        &self,
        _instructor_id: &str,
        _instructor_name: &str,
        _course: &NewCourse,
    ) -> BackendResult<Course> {
        Err(BackendError::Unconfigured)
    }

    async fn insert_testimonial(
        &self,
        _user_id: &str,
        _testimonial: &NewTestimonial,
    ) -> BackendResult<()> {
        Err(BackendError::Unconfigured)
    }
}
