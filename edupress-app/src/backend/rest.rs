//! REST client for a PostgREST-style backend
//!
//! Tables live under `<url>/rest/v1/<table>`; every request carries the API
//! key both as `apikey` and as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use edupress_core::{
    Course, CourseFilter, EnrolledCourse, Lesson, NewCourse, NewTestimonial, Progress, Testimonial,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::{Backend, BackendError, BackendResult};
use crate::config::BackendConfig;

const COURSE_SELECT: &str = "*,profiles:instructor_id(full_name)";
const TESTIMONIAL_SELECT: &str = "*,profiles:user_id(full_name,role,avatar_url)";
const ENROLLMENT_SELECT: &str =
    "progress,completed,courses:course_id(*,profiles:instructor_id(full_name))";

#[derive(Deserialize)]
struct ProfileName {
    full_name: String,
}

#[derive(Deserialize)]
struct CourseRow {
    id: String,
    title: String,
    description: Option<String>,
    instructor_id: Option<String>,
    profiles: Option<ProfileName>,
    rating: f64,
    review_count: u32,
    price: f64,
    original_price: Option<f64>,
    category: String,
    image: String,
    bestseller: Option<bool>,
}

impl CourseRow {
    fn into_course(self) -> Course {
        Course {
            id: self.id,
            title: self.title,
            description: self.description,
            instructor: self
                .profiles
                .map(|p| p.full_name)
                .unwrap_or_else(|| "Unknown instructor".to_string()),
            instructor_id: self.instructor_id,
            rating: self.rating,
            review_count: self.review_count,
            price: self.price,
            original_price: self.original_price,
            category: self.category,
            image: self.image,
            bestseller: self.bestseller.unwrap_or(false),
        }
    }
}

#[derive(Deserialize)]
struct LessonRow {
    id: String,
    course_id: String,
    title: String,
    description: String,
    video_url: String,
    duration: String,
    order: u32,
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Lesson {
            id: row.id,
            course_id: row.course_id,
            title: row.title,
            description: row.description,
            video_url: row.video_url,
            duration: row.duration,
            order: row.order,
        }
    }
}

#[derive(Deserialize)]
struct TestimonialAuthor {
    full_name: String,
    role: String,
    avatar_url: Option<String>,
}

#[derive(Deserialize)]
struct TestimonialRow {
    id: String,
    content: String,
    rating: u8,
    profiles: TestimonialAuthor,
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        Testimonial {
            id: row.id,
            name: row.profiles.full_name,
            role: row.profiles.role,
            content: row.content,
            avatar: row.profiles.avatar_url.unwrap_or_default(),
            rating: row.rating,
        }
    }
}

#[derive(Deserialize)]
struct EnrollmentRow {
    progress: u8,
    completed: bool,
    courses: CourseRow,
}

impl EnrollmentRow {
    fn into_enrolled(self) -> BackendResult<EnrolledCourse> {
        let progress =
            Progress::new(self.progress).map_err(|e| BackendError::Schema(e.to_string()))?;
        Ok(EnrolledCourse {
            course: self.courses.into_course(),
            progress,
            completed: self.completed,
        })
    }
}

/// Strip characters with meaning in PostgREST filter syntax
fn sanitize(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '"' | '*'))
        .collect()
}

/// HTTP client for the remote backend
pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    pub fn new(config: &BackendConfig, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .user_agent("edupress/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to build client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(request: RequestBuilder) -> BackendResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }
        Ok(response)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> BackendResult<Vec<T>> {
        let response = Self::send(self.request(Method::GET, table).query(query)).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| BackendError::Schema(e.to_string()))
    }

    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> BackendResult<Option<T>> {
        let mut query = query.to_vec();
        query.push(("limit", "1".to_string()));
        Ok(self.select(table, &query).await?.into_iter().next())
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn list_courses(&self, filter: &CourseFilter) -> BackendResult<Vec<Course>> {
        let mut query = vec![
            ("select", COURSE_SELECT.to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
            query.push(("category", format!("eq.{category}")));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let term = sanitize(search);
            query.push((
                "or",
                format!("(title.ilike.*{term}*,description.ilike.*{term}*)"),
            ));
        }

        let rows: Vec<CourseRow> = self.select("courses", &query).await?;
        Ok(rows.into_iter().map(CourseRow::into_course).collect())
    }

    async fn get_course(&self, id: &str) -> BackendResult<Option<Course>> {
        let row: Option<CourseRow> = self
            .select_one(
                "courses",
                &[("select", COURSE_SELECT.to_string()), ("id", format!("eq.{id}"))],
            )
            .await?;
        Ok(row.map(CourseRow::into_course))
    }

    async fn list_lessons(&self, course_id: &str) -> BackendResult<Vec<Lesson>> {
        let rows: Vec<LessonRow> = self
            .select(
                "lessons",
                &[
                    ("select", "*".to_string()),
                    ("course_id", format!("eq.{course_id}")),
                    ("order", "order.asc".to_string()),
                ],
            )
            .await?;
        let mut lessons: Vec<Lesson> = rows.into_iter().map(Lesson::from).collect();
        lessons.sort_by_key(|l| l.order);
        Ok(lessons)
    }

    async fn get_lesson(&self, id: &str) -> BackendResult<Option<Lesson>> {
        let row: Option<LessonRow> = self
            .select_one(
                "lessons",
                &[("select", "*".to_string()), ("id", format!("eq.{id}"))],
            )
            .await?;
        Ok(row.map(Lesson::from))
    }

    async fn list_testimonials(&self) -> BackendResult<Vec<Testimonial>> {
        let rows: Vec<TestimonialRow> = self
            .select(
                "testimonials",
                &[
                    ("select", TESTIMONIAL_SELECT.to_string()),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Testimonial::from).collect())
    }

    async fn list_enrollments(&self, user_id: &str) -> BackendResult<Vec<EnrolledCourse>> {
        let rows: Vec<EnrollmentRow> = self
            .select(
                "enrollments",
                &[
                    ("select", ENROLLMENT_SELECT.to_string()),
                    ("user_id", format!("eq.{user_id}")),
                ],
            )
            .await?;
        rows.into_iter().map(EnrollmentRow::into_enrolled).collect()
    }

    async fn insert_enrollment(&self, user_id: &str, course_id: &str) -> BackendResult<()> {
        let now = Utc::now().to_rfc3339();
        let body = json!({
            "user_id": user_id,
            "course_id": course_id,
            "progress": 0,
            "completed": false,
            "created_at": now,
            "updated_at": now,
        });
        Self::send(self.request(Method::POST, "enrollments").json(&body)).await?;
        Ok(())
    }

    async fn update_progress(
        &self,
        user_id: &str,
        course_id: &str,
        progress: Progress,
    ) -> BackendResult<()> {
        let body = json!({
            "progress": progress.percent(),
            "completed": progress.is_complete(),
            "updated_at": Utc::now().to_rfc3339(),
        });
        let request = self
            .request(Method::PATCH, "enrollments")
            .query(&[
                ("user_id", format!("eq.{user_id}")),
                ("course_id", format!("eq.{course_id}")),
            ])
            .json(&body);
        Self::send(request).await?;
        Ok(())
    }

    async fn insert_course(
        &self,
        instructor_id: &str,
        instructor_name: &str,
        course: &NewCourse,
    ) -> BackendResult<Course> {
        let now = Utc::now().to_rfc3339();
        let body = json!({
            "title": course.title,
            "description": course.description,
            "category": course.category,
            "price": course.price,
            "original_price": course.original_price,
            "image": course.image,
            "bestseller": course.bestseller,
            "instructor_id": instructor_id,
            "rating": 0,
            "review_count": 0,
            "created_at": now,
            "updated_at": now,
        });
        let request = self
            .request(Method::POST, "courses")
            .header("Prefer", "return=representation")
            .json(&body);
        let rows: Vec<CourseRow> = Self::send(request)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Schema(e.to_string()))?;

        let mut created = rows
            .into_iter()
            .next()
            .map(CourseRow::into_course)
            .ok_or_else(|| BackendError::Schema("insert returned no rows".to_string()))?;
        created.instructor = instructor_name.to_string();
        Ok(created)
    }

    async fn insert_testimonial(
        &self,
        user_id: &str,
        testimonial: &NewTestimonial,
    ) -> BackendResult<()> {
        let body = json!({
            "user_id": user_id,
            "content": testimonial.content,
            "rating": testimonial.rating,
            "created_at": Utc::now().to_rfc3339(),
        });
        Self::send(self.request(Method::POST, "testimonials").json(&body)).await?;
        Ok(())
    }
}
