//! Catalog records
//!
//! Plain value objects fetched from the backend or the fixture set. The only
//! client-side state is enrollment progress, a percentage attached to a
//! (user, course) pair.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A course in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub instructor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub bestseller: bool,
}

/// A lesson belonging to a course, ordered within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub duration: String,
    pub order: u32,
}

/// A student testimonial shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    pub content: String,
    pub avatar: String,
    pub rating: u8,
}

/// Completion percentage of an enrollment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    pub const COMPLETE: Progress = Progress(100);

    pub fn new(percent: u8) -> Result<Self> {
        if percent > 100 {
            return Err(Error::InvalidProgress(percent));
        }
        Ok(Progress(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn is_complete(&self) -> bool {
        self.0 == 100
    }
}

impl TryFrom<u8> for Progress {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Progress::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(p: Progress) -> u8 {
        p.0
    }
}

/// A course a user is enrolled in, with their progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledCourse {
    #[serde(flatten)]
    pub course: Course,
    pub progress: Progress,
    pub completed: bool,
}

impl EnrolledCourse {
    pub fn new(course: Course, progress: Progress) -> Self {
        Self {
            course,
            completed: progress.is_complete(),
            progress,
        }
    }
}

/// Optional narrowing of a course listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl CourseFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            search: None,
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            category: None,
            search: Some(query.into()),
        }
    }

    /// Category must match exactly; the search term must appear in the title
    /// or description, ignoring case. Empty strings do not filter.
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if course.category != category {
                return false;
            }
        }
        if let Some(query) = self.search.as_deref().filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let in_title = course.title.to_lowercase().contains(&query);
            let in_description = course
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}

/// Fields a teacher submits to create a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    pub image: String,
    #[serde(default)]
    pub bestseller: bool,
}

impl NewCourse {
    /// Build the record as the catalog would list it, with no ratings yet
    pub fn into_course(self, id: String, instructor_id: &str, instructor: &str) -> Course {
        Course {
            id,
            title: self.title,
            description: Some(self.description),
            instructor: instructor.to_string(),
            instructor_id: Some(instructor_id.to_string()),
            rating: 0.0,
            review_count: 0,
            price: self.price,
            original_price: self.original_price,
            category: self.category,
            image: self.image,
            bestseller: self.bestseller,
        }
    }
}

/// A testimonial submitted by a signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTestimonial {
    pub content: String,
    pub rating: u8,
}

impl NewTestimonial {
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(Error::InvalidRating(self.rating));
        }
        Ok(())
    }
}

/// The lesson following `order` in `course_id`, if any
pub fn next_lesson<'a>(lessons: &'a [Lesson], course_id: &str, order: u32) -> Option<&'a Lesson> {
    lessons
        .iter()
        .filter(|l| l.course_id == course_id && l.order > order)
        .min_by_key(|l| l.order)
}

/// The lesson preceding `order` in `course_id`, if any
pub fn previous_lesson<'a>(
    lessons: &'a [Lesson],
    course_id: &str,
    order: u32,
) -> Option<&'a Lesson> {
    lessons
        .iter()
        .filter(|l| l.course_id == course_id && l.order < order)
        .max_by_key(|l| l.order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str, category: &str, description: Option<&str>) -> Course {
        Course {
            id: title.to_lowercase(),
            title: title.to_string(),
            description: description.map(str::to_string),
            instructor: "Someone".to_string(),
            instructor_id: None,
            rating: 4.5,
            review_count: 10,
            price: 10.0,
            original_price: None,
            category: category.to_string(),
            image: String::new(),
            bestseller: false,
        }
    }

    fn lesson(id: &str, course_id: &str, order: u32) -> Lesson {
        Lesson {
            id: id.to_string(),
            course_id: course_id.to_string(),
            title: id.to_string(),
            description: String::new(),
            video_url: String::new(),
            duration: "10 minutes".to_string(),
            order,
        }
    }

    #[test]
    fn test_progress_bounds() {
        assert!(Progress::new(0).is_ok());
        assert!(Progress::new(100).unwrap().is_complete());
        assert!(matches!(Progress::new(101), Err(Error::InvalidProgress(101))));
        assert!(serde_json::from_str::<Progress>("150").is_err());
    }

    #[test]
    fn test_enrolled_course_completion_follows_progress() {
        let c = course("Rust", "Systems", None);
        assert!(EnrolledCourse::new(c.clone(), Progress::COMPLETE).completed);
        assert!(!EnrolledCourse::new(c, Progress::new(99).unwrap()).completed);
    }

    #[test]
    fn test_filter_category() {
        let filter = CourseFilter::category("Design");
        assert!(filter.matches(&course("UI", "Design", None)));
        assert!(!filter.matches(&course("React", "React", None)));
    }

    #[test]
    fn test_filter_search_title_or_description() {
        let filter = CourseFilter::search("PYTHON");
        assert!(filter.matches(&course("Python for Data", "Data", None)));
        assert!(filter.matches(&course("Data", "Data", Some("uses python and pandas"))));
        assert!(!filter.matches(&course("Design", "Design", Some("figma"))));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = CourseFilter {
            category: Some(String::new()),
            search: Some(String::new()),
        };
        assert!(filter.matches(&course("Anything", "Any", None)));
    }

    #[test]
    fn test_lesson_navigation() {
        let lessons = vec![
            lesson("a", "c1", 1),
            lesson("c", "c1", 3),
            lesson("b", "c1", 2),
            lesson("x", "c2", 2),
        ];
        assert_eq!(next_lesson(&lessons, "c1", 1).unwrap().id, "b");
        assert_eq!(previous_lesson(&lessons, "c1", 3).unwrap().id, "b");
        assert!(next_lesson(&lessons, "c1", 3).is_none());
        assert!(previous_lesson(&lessons, "c1", 1).is_none());
    }

    #[test]
    fn test_new_testimonial_rating() {
        let ok = NewTestimonial { content: "great".into(), rating: 5 };
        assert!(ok.validate().is_ok());
        let bad = NewTestimonial { content: "meh".into(), rating: 0 };
        assert!(bad.validate().is_err());
    }
}
