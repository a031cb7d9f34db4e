//! Role gate
//!
//! Maps the current session and a view's required roles to either rendering
//! the view or redirecting somewhere else. Pure and total: every input,
//! including a malformed role claim, produces a decision.

use serde::{Deserialize, Serialize};

use crate::{Role, RoleSet, Session};

/// Views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Home,
    Courses,
    CourseDetail,
    Login,
    Signup,
    ForgotPassword,
    StudentDashboard,
    LessonView,
    TakeQuiz,
    TeacherDashboard,
    CreateCourse,
    CreateQuiz,
    AdminDashboard,
    AdminUsers,
    AdminTeachers,
}

impl View {
    pub const ALL: [View; 15] = [
        View::Home,
        View::Courses,
        View::CourseDetail,
        View::Login,
        View::Signup,
        View::ForgotPassword,
        View::StudentDashboard,
        View::LessonView,
        View::TakeQuiz,
        View::TeacherDashboard,
        View::CreateCourse,
        View::CreateQuiz,
        View::AdminDashboard,
        View::AdminUsers,
        View::AdminTeachers,
    ];

    /// Stable identifier used in URLs
    pub fn slug(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Courses => "courses",
            View::CourseDetail => "course-detail",
            View::Login => "login",
            View::Signup => "signup",
            View::ForgotPassword => "forgot-password",
            View::StudentDashboard => "student-dashboard",
            View::LessonView => "lesson-view",
            View::TakeQuiz => "take-quiz",
            View::TeacherDashboard => "teacher-dashboard",
            View::CreateCourse => "create-course",
            View::CreateQuiz => "create-quiz",
            View::AdminDashboard => "admin-dashboard",
            View::AdminUsers => "admin-users",
            View::AdminTeachers => "admin-teachers",
        }
    }

    pub fn from_slug(slug: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.slug() == slug)
    }

    /// Client-side path of the view
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Courses => "/courses",
            View::CourseDetail => "/course/:id",
            View::Login => "/login",
            View::Signup => "/signup",
            View::ForgotPassword => "/forgot-password",
            View::StudentDashboard => "/dashboard",
            View::LessonView => "/course/:courseId/lesson/:lessonId",
            View::TakeQuiz => "/course/:courseId/quiz",
            View::TeacherDashboard => "/teacher/dashboard",
            View::CreateCourse => "/teacher/create-course",
            View::CreateQuiz => "/course/:courseId/create-quiz",
            View::AdminDashboard => "/admin",
            View::AdminUsers => "/admin/users",
            View::AdminTeachers => "/admin/teachers",
        }
    }

    /// Roles allowed to reach the view; `None` for public views
    pub fn required_roles(&self) -> Option<RoleSet> {
        match self {
            View::Home
            | View::Courses
            | View::CourseDetail
            | View::Login
            | View::Signup
            | View::ForgotPassword => None,
            View::StudentDashboard => Some(RoleSet::STUDENT),
            View::LessonView | View::TakeQuiz => Some(RoleSet::EVERYONE),
            View::TeacherDashboard | View::CreateCourse | View::CreateQuiz => {
                Some(RoleSet::STAFF)
            }
            View::AdminDashboard | View::AdminUsers | View::AdminTeachers => Some(RoleSet::ADMIN),
        }
    }
}

/// Outcome of the role gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Redirect(View),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

fn decide(role: Option<Role>, required: &RoleSet) -> Decision {
    match role {
        None => Decision::Redirect(View::Login),
        Some(_) if required.is_empty() => Decision::Allow,
        Some(role) if required.contains(role) => Decision::Allow,
        Some(role) => Decision::Redirect(role.home_view()),
    }
}

/// Decide whether `session` may reach a view requiring `required`
pub fn authorize(session: Option<&Session>, required: &RoleSet) -> Decision {
    decide(session.map(|s| s.role), required)
}

/// Same rules as [`authorize`] over an untyped role claim.
///
/// An unknown or malformed role is treated as unauthenticated.
pub fn authorize_claim(role: Option<&str>, required: &RoleSet) -> Decision {
    decide(role.and_then(Role::parse), required)
}

/// Gate a concrete view. Public views are always allowed.
pub fn authorize_view(session: Option<&Session>, view: View) -> Decision {
    match view.required_roles() {
        None => Decision::Allow,
        Some(required) => authorize(session, &required),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_slug(view.slug()), Some(view));
        }
        assert_eq!(View::from_slug("nope"), None);
    }

    #[test]
    fn test_serde_slug_matches() {
        for view in View::ALL {
            let json = serde_json::to_string(&view).unwrap();
            assert_eq!(json, format!("\"{}\"", view.slug()));
        }
    }

    #[test]
    fn test_claim_unknown_role_goes_to_login() {
        assert_eq!(
            authorize_claim(Some("superuser"), &RoleSet::ANY),
            Decision::Redirect(View::Login)
        );
        assert_eq!(
            authorize_claim(Some(""), &RoleSet::EVERYONE),
            Decision::Redirect(View::Login)
        );
    }

    #[test]
    fn test_claim_known_role() {
        assert_eq!(authorize_claim(Some("ADMIN"), &RoleSet::ADMIN), Decision::Allow);
        assert_eq!(
            authorize_claim(Some("teacher"), &RoleSet::ADMIN),
            Decision::Redirect(View::TeacherDashboard)
        );
    }

    #[test]
    fn test_public_views_never_gated() {
        for view in View::ALL {
            if view.required_roles().is_none() {
                assert_eq!(authorize_view(None, view), Decision::Allow);
            }
        }
    }

    #[test]
    fn test_decision_serialization() {
        let json = serde_json::to_value(Decision::Redirect(View::Login)).unwrap();
        assert_eq!(json["decision"], "redirect");
        assert_eq!(json["to"], "login");
        let json = serde_json::to_value(Decision::Allow).unwrap();
        assert_eq!(json["decision"], "allow");
    }
}
