//! EduPress Core Library
//!
//! Domain types shared by the EduPress app:
//! - Roles and the per-role home views
//! - The signed-in user's session and profile updates
//! - The role gate deciding whether a view renders or redirects
//! - Catalog records (courses, lessons, testimonials) and quiz scoring

pub mod catalog;
pub mod error;
pub mod gate;
pub mod quiz;
pub mod role;
pub mod session;

pub use catalog::{
    Course, CourseFilter, EnrolledCourse, Lesson, NewCourse, NewTestimonial, Progress,
    Testimonial,
};
pub use error::Error;
pub use gate::{authorize, authorize_claim, authorize_view, Decision, View};
pub use quiz::{Answer, AnswerKey, Question, QuestionKind, Quiz, QuizResult};
pub use role::{Role, RoleSet};
pub use session::{ProfileUpdate, Session, SocialLinks};

/// Result type for edupress-core operations
pub type Result<T> = std::result::Result<T, Error>;
