//! Static fixture data served when the remote backend is unavailable

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use edupress_core::{
    Answer, AnswerKey, Course, Lesson, Question, QuestionKind, Quiz, Role, Session, Testimonial,
};

use crate::store::Account;

fn fixture_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}

fn demo_profile(id: &str, email: &str, role: Role) -> Session {
    let name = match role {
        Role::Admin => "Admin User",
        Role::Teacher => "Teacher User",
        Role::Student => "Student User",
    };
    Session {
        user_id: id.to_string(),
        email: email.to_string(),
        full_name: name.to_string(),
        role,
        avatar_url: Some(avatar(role.as_str())),
        email_verified: true,
        created_at: fixture_epoch(),
        last_login_at: None,
        bio: None,
        website: None,
        location: None,
        social_links: None,
    }
}

/// The three built-in demo accounts
pub fn demo_accounts() -> Vec<Account> {
    [
        ("1", "admin@edupress.com", Role::Admin),
        ("2", "teacher@edupress.com", Role::Teacher),
        ("3", "student@edupress.com", Role::Student),
    ]
    .into_iter()
    .map(|(id, email, role)| Account {
        profile: demo_profile(id, email, role),
        password_hash: None,
    })
    .collect()
}

/// Demo account for an email whose local part names a role, on any domain.
///
/// `admin@x.com` is an admin, `teacher@school.org` a teacher; anything else
/// has no demo account. The user id is derived from the normalized email, so
/// `student@a.com` and `student@b.com` are distinct users.
pub fn demo_account_for(email: &str) -> Option<Account> {
    let email = email.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    if domain.is_empty() {
        return None;
    }
    let role = match local {
        "admin" => Role::Admin,
        "teacher" => Role::Teacher,
        "student" => Role::Student,
        _ => return None,
    };
    Some(Account {
        profile: demo_profile(&format!("demo-{email}"), &email, role),
        password_hash: None,
    })
}

#[allow(clippy::too_many_arguments)]
fn course(
    id: &str,
    title: &str,
    instructor: &str,
    rating: f64,
    review_count: u32,
    price: f64,
    original_price: f64,
    category: &str,
    image: &str,
    bestseller: bool,
    description: &str,
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        instructor: instructor.to_string(),
        instructor_id: None,
        rating,
        review_count,
        price,
        original_price: Some(original_price),
        category: category.to_string(),
        image: format!("https://images.unsplash.com/{image}?w=800&q=80"),
        bestseller,
    }
}

pub fn courses() -> Vec<Course> {
    vec![
        course(
            "course-1",
            "Complete Web Development Bootcamp",
            "Dr. Jane Smith",
            4.8,
            2453,
            89.99,
            199.99,
            "Web Development",
            "photo-1498050108023-c5249f4df085",
            true,
            "Learn web development from scratch with HTML, CSS, JavaScript, React, Node.js and more. This comprehensive bootcamp will take you from beginner to professional developer.",
        ),
        course(
            "course-2",
            "Advanced JavaScript: From Fundamentals to Functional JS",
            "Prof. Michael Johnson",
            4.7,
            1872,
            94.99,
            189.99,
            "JavaScript",
            "photo-1579468118864-1b9ea3c0db4a",
            true,
            "Take your JavaScript skills to the next level with advanced concepts, functional programming techniques, and modern ES6+ features.",
        ),
        course(
            "course-3",
            "React & Redux Masterclass",
            "Sarah Williams",
            4.9,
            3241,
            109.99,
            229.99,
            "React",
            "photo-1633356122544-f134324a6cee",
            false,
            "Master React.js and Redux with hands-on projects. Learn component architecture, state management, hooks, context API and more.",
        ),
        course(
            "course-4",
            "Python for Data Science and Machine Learning",
            "Dr. Alex Chen",
            4.8,
            2876,
            119.99,
            249.99,
            "Data Science",
            "photo-1526379879527-8559ecfcaec0",
            true,
            "Learn Python for data analysis, visualization, and machine learning. Includes pandas, NumPy, Matplotlib, scikit-learn and more.",
        ),
        course(
            "course-5",
            "UI/UX Design Fundamentals",
            "Emily Rodriguez",
            4.6,
            1543,
            79.99,
            169.99,
            "Design",
            "photo-1561070791-2526d30994b5",
            false,
            "Learn the principles of effective UI/UX design. Master user research, wireframing, prototyping, and design systems.",
        ),
        course(
            "course-6",
            "Full Stack Mobile Development with React Native",
            "James Wilson",
            4.7,
            1987,
            99.99,
            199.99,
            "Mobile Development",
            "photo-1555774698-0b77e0d5fac6",
            true,
            "Build cross-platform mobile apps for iOS and Android using React Native. Includes state management, navigation, and API integration.",
        ),
    ]
}

fn lesson(
    id: &str,
    course_id: &str,
    title: &str,
    description: &str,
    minutes: u32,
    video: &str,
    order: u32,
) -> Lesson {
    Lesson {
        id: id.to_string(),
        course_id: course_id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        video_url: format!("https://example.com/videos/{video}"),
        duration: format!("{minutes} minutes"),
        order,
    }
}

pub fn lessons() -> Vec<Lesson> {
    vec![
        lesson(
            "lesson-1",
            "course-1",
            "Introduction to HTML",
            "Learn the basics of HTML structure and elements",
            45,
            "intro-html",
            1,
        ),
        lesson(
            "lesson-2",
            "course-1",
            "CSS Fundamentals",
            "Master the core concepts of CSS styling",
            50,
            "css-fundamentals",
            2,
        ),
        lesson(
            "lesson-3",
            "course-1",
            "JavaScript Basics",
            "Get started with JavaScript programming",
            60,
            "js-basics",
            3,
        ),
        lesson(
            "lesson-4",
            "course-2",
            "Advanced JavaScript Concepts",
            "Dive deep into closures, prototypes, and this keyword",
            65,
            "advanced-js",
            1,
        ),
        lesson(
            "lesson-5",
            "course-2",
            "Functional Programming in JavaScript",
            "Learn map, filter, reduce and other functional techniques",
            55,
            "functional-js",
            2,
        ),
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    [
        (
            "1",
            "Sarah Johnson",
            "Web Development Student",
            "EduPress completely transformed my learning experience. The courses are well-structured and the instructors are incredibly knowledgeable. I went from knowing nothing about coding to building my own websites in just a few months!",
            "sarah",
            5,
        ),
        (
            "2",
            "Michael Chen",
            "Data Science Professional",
            "The data science courses on EduPress are top-notch. The practical projects helped me apply what I learned immediately in my job. My company has already seen the benefits of my enhanced skills.",
            "michael",
            4,
        ),
        (
            "3",
            "Jessica Williams",
            "Graphic Design Student",
            "As someone transitioning careers, EduPress provided exactly what I needed. The design courses are comprehensive and the feedback from instructors was invaluable for my portfolio development.",
            "jessica",
            5,
        ),
        (
            "4",
            "David Rodriguez",
            "Business Analytics Manager",
            "I've taken courses on multiple platforms, but EduPress stands out for its quality and depth. The business analytics program helped me secure a promotion within three months of completion.",
            "david",
            5,
        ),
    ]
    .into_iter()
    .map(|(id, name, role, content, seed, rating)| Testimonial {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        content: content.to_string(),
        avatar: avatar(seed),
        rating,
    })
    .collect()
}

fn question(id: &str, prompt: &str, options: &[&str], kind: QuestionKind) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        kind,
    }
}

/// The HTML fundamentals quiz, served for every course, and its answer key
pub fn quiz(course_id: &str) -> (Quiz, AnswerKey) {
    let quiz = Quiz {
        id: "quiz-1".to_string(),
        course_id: course_id.to_string(),
        title: "HTML Fundamentals Quiz".to_string(),
        description: "Test your knowledge of HTML fundamentals covered in this course."
            .to_string(),
        time_limit_minutes: 30,
        passing_score: 70,
        questions: vec![
            question(
                "q1",
                "What does HTML stand for?",
                &[
                    "Hyper Text Markup Language",
                    "High Tech Modern Language",
                    "Hyperlink and Text Markup Language",
                    "Home Tool Markup Language",
                ],
                QuestionKind::Single,
            ),
            question(
                "q2",
                "Which HTML element is used for creating a paragraph?",
                &["<paragraph>", "<p>", "<para>", "<text>"],
                QuestionKind::Single,
            ),
            question(
                "q3",
                "Which of the following are valid HTML5 semantic elements? (Select all that apply)",
                &["<article>", "<section>", "<container>", "<aside>"],
                QuestionKind::Multiple,
            ),
            question(
                "q4",
                "What is the correct HTML element for inserting a line break?",
                &["<lb>", "<break>", "<br>", "<newline>"],
                QuestionKind::Single,
            ),
            question(
                "q5",
                "Which attribute is used to specify an alternate text for an image?",
                &["src", "alt", "title", "href"],
                QuestionKind::Single,
            ),
        ],
    };

    let key = HashMap::from([
        ("q1".to_string(), Answer::Single(0)),
        ("q2".to_string(), Answer::Single(1)),
        ("q3".to_string(), Answer::Multiple(vec![0, 1, 3])),
        ("q4".to_string(), Answer::Single(2)),
        ("q5".to_string(), Answer::Single(1)),
    ]);

    (quiz, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_account_for_role_local_parts() {
        let admin = demo_account_for("Admin@X.com").unwrap();
        assert_eq!(admin.profile.role, Role::Admin);
        assert_eq!(admin.profile.email, "admin@x.com");
        assert_eq!(admin.profile.user_id, "demo-admin@x.com");

        assert_eq!(
            demo_account_for("teacher@school.org").unwrap().profile.role,
            Role::Teacher
        );
        assert!(demo_account_for("jane@x.com").is_none());
        assert!(demo_account_for("admin").is_none());
        assert!(demo_account_for("admin@").is_none());
    }

    #[test]
    fn test_demo_accounts_of_one_role_are_distinct_users() {
        let a = demo_account_for("student@a.com").unwrap();
        let b = demo_account_for("student@b.com").unwrap();
        assert_ne!(a.profile.user_id, b.profile.user_id);

        // Case and whitespace do not change the identity
        let again = demo_account_for("  Student@A.com ").unwrap();
        assert_eq!(a.profile.user_id, again.profile.user_id);
    }

    #[test]
    fn test_fixtures_are_deterministic() {
        assert_eq!(courses(), courses());
        assert_eq!(demo_accounts()[0].profile, demo_accounts()[0].profile);
    }

    #[test]
    fn test_lessons_reference_fixture_courses() {
        let ids: Vec<String> = courses().into_iter().map(|c| c.id).collect();
        assert!(lessons().iter().all(|l| ids.contains(&l.course_id)));
    }

    #[test]
    fn test_quiz_key_covers_every_question() {
        let (quiz, key) = quiz("course-1");
        assert_eq!(quiz.questions.len(), key.len());
        assert!(quiz.questions.iter().all(|q| key.contains_key(&q.id)));
    }
}
