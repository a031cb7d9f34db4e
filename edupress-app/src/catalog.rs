//! Data access façade
//!
//! Every read tries the backend first and degrades to fixtures. Writes that the
//! backend refuses are absorbed: enrollment progress goes to a local ledger,
//! created courses and testimonials are accepted without being stored.

use std::collections::HashMap;
use std::sync::RwLock;

use edupress_core::catalog::{next_lesson, previous_lesson};
use edupress_core::{
    quiz, Answer, Course, CourseFilter, EnrolledCourse, Lesson, NewCourse,
    NewTestimonial, Progress, Quiz, QuizResult, Testimonial,
};

use crate::backend::Backend;
use crate::crypto::generate_id;
use crate::error::AppError;
use crate::fallback::{with_fallback, write_or_local, Fetched, Source};
use crate::fixtures;

/// Course and lesson access for one client
pub struct Catalog<B: Backend> {
    backend: B,
    /// Locally simulated enrollments, keyed by (user id, course id)
    ledger: RwLock<HashMap<(String, String), Progress>>,
}

impl<B: Backend> Catalog<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ledger: RwLock::new(HashMap::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn courses(&self, filter: &CourseFilter) -> Fetched<Vec<Course>> {
        with_fallback("courses", self.backend.list_courses(filter), || {
            fixtures::courses()
                .into_iter()
                .filter(|c| filter.matches(c))
                .collect()
        })
        .await
    }

    pub async fn course(&self, id: &str) -> Fetched<Option<Course>> {
        with_fallback("course", self.backend.get_course(id), || {
            fixtures::courses().into_iter().find(|c| c.id == id)
        })
        .await
    }

    /// Lessons of a course, in ascending order
    pub async fn lessons(&self, course_id: &str) -> Fetched<Vec<Lesson>> {
        let mut fetched = with_fallback("lessons", self.backend.list_lessons(course_id), || {
            fixtures::lessons()
                .into_iter()
                .filter(|l| l.course_id == course_id)
                .collect()
        })
        .await;
        fetched.data.sort_by_key(|l| l.order);
        fetched
    }

    pub async fn lesson(&self, id: &str) -> Fetched<Option<Lesson>> {
        with_fallback("lesson", self.backend.get_lesson(id), || {
            fixtures::lessons().into_iter().find(|l| l.id == id)
        })
        .await
    }

    pub async fn next_lesson(&self, course_id: &str, order: u32) -> Fetched<Option<Lesson>> {
        self.lessons(course_id)
            .await
            .map(|lessons| next_lesson(&lessons, course_id, order).cloned())
    }

    pub async fn previous_lesson(&self, course_id: &str, order: u32) -> Fetched<Option<Lesson>> {
        self.lessons(course_id)
            .await
            .map(|lessons| previous_lesson(&lessons, course_id, order).cloned())
    }

    pub async fn testimonials(&self) -> Fetched<Vec<Testimonial>> {
        with_fallback(
            "testimonials",
            self.backend.list_testimonials(),
            fixtures::testimonials,
        )
        .await
    }

    /// Enroll a user in a course at 0% progress
    pub async fn enroll(&self, user_id: &str, course_id: &str) -> Source {
        write_or_local(
            "enroll",
            self.backend.insert_enrollment(user_id, course_id),
            || {
                self.ledger
                    .write()
                    .unwrap()
                    .entry((user_id.to_string(), course_id.to_string()))
                    .or_default();
            },
        )
        .await
    }

    /// Courses a user is enrolled in.
    ///
    /// The fixture side lists exactly the enrollments recorded in the local
    /// ledger.
    pub async fn enrolled_courses(&self, user_id: &str) -> Fetched<Vec<EnrolledCourse>> {
        with_fallback("enrollments", self.backend.list_enrollments(user_id), || {
            let ledger = self.ledger.read().unwrap();
            fixtures::courses()
                .into_iter()
                .filter_map(|course| {
                    ledger
                        .get(&(user_id.to_string(), course.id.clone()))
                        .map(|progress| EnrolledCourse::new(course, *progress))
                })
                .collect()
        })
        .await
    }

    /// Record progress on an existing enrollment.
    ///
    /// Like the remote update, this matches on (user, course) and changes
    /// nothing when the user is not enrolled.
    pub async fn update_progress(
        &self,
        user_id: &str,
        course_id: &str,
        progress: Progress,
    ) -> Source {
        write_or_local(
            "update_progress",
            self.backend.update_progress(user_id, course_id, progress),
            || {
                let mut ledger = self.ledger.write().unwrap();
                match ledger.get_mut(&(user_id.to_string(), course_id.to_string())) {
                    Some(current) => *current = progress,
                    None => tracing::debug!(user_id, course_id, "No enrollment to update"),
                }
            },
        )
        .await
    }

    /// Publish a new course.
    ///
    /// Without the backend the course is built locally and returned but not
    /// added to the fixture listing.
    pub async fn create_course(
        &self,
        instructor_id: &str,
        instructor_name: &str,
        course: NewCourse,
    ) -> Fetched<Course> {
        let remote = self
            .backend
            .insert_course(instructor_id, instructor_name, &course);
        with_fallback("create_course", remote, || {
            course
                .clone()
                .into_course(generate_id(), instructor_id, instructor_name)
        })
        .await
    }

    pub async fn add_testimonial(
        &self,
        user_id: &str,
        testimonial: NewTestimonial,
    ) -> Result<Source, AppError> {
        testimonial.validate()?;
        if testimonial.content.trim().is_empty() {
            return Err(AppError::Validation("Testimonial content is required".to_string()));
        }
        Ok(write_or_local(
            "add_testimonial",
            self.backend.insert_testimonial(user_id, &testimonial),
            || tracing::debug!(user_id, "Testimonial accepted without a backend"),
        )
        .await)
    }

    /// The quiz for a course, without its answer key
    pub fn quiz(&self, course_id: &str) -> Quiz {
        fixtures::quiz(course_id).0
    }

    pub fn submit_quiz(
        &self,
        course_id: &str,
        answers: &HashMap<String, Answer>,
    ) -> Result<QuizResult, AppError> {
        let (served, key) = fixtures::quiz(course_id);
        let result = quiz::score(&served, &key, answers)?;
        tracing::info!(
            course_id,
            score = result.score,
            passed = result.passed,
            "Quiz submitted"
        );
        Ok(result)
    }
}
