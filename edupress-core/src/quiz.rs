//! Quiz definitions and scoring

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Exactly one option is correct
    Single,
    /// Select all that apply
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub time_limit_minutes: u32,
    /// Minimum score, in percent, to pass
    pub passing_score: u8,
    pub questions: Vec<Question>,
}

/// A submitted answer: one option index, or the set of selected indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(usize),
    Multiple(Vec<usize>),
}

impl Answer {
    fn selected(&self) -> BTreeSet<usize> {
        match self {
            Answer::Single(i) => BTreeSet::from([*i]),
            Answer::Multiple(v) => v.iter().copied().collect(),
        }
    }
}

/// Correct answers keyed by question id
pub type AnswerKey = HashMap<String, Answer>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    /// Rounded percentage of correct answers
    pub score: u8,
    pub passed: bool,
}

fn is_correct(kind: QuestionKind, given: &Answer, expected: &Answer) -> bool {
    match (kind, given) {
        (QuestionKind::Single, Answer::Single(_)) => given == expected,
        (QuestionKind::Multiple, Answer::Multiple(_)) => given.selected() == expected.selected(),
        _ => false,
    }
}

/// Grade `answers` against `key`.
///
/// Unanswered questions count as wrong. Answers to questions the quiz does not
/// contain are rejected.
pub fn score(quiz: &Quiz, key: &AnswerKey, answers: &HashMap<String, Answer>) -> Result<QuizResult> {
    if let Some(unknown) = answers
        .keys()
        .find(|id| !quiz.questions.iter().any(|q| &q.id == *id))
    {
        return Err(Error::UnknownQuestion(unknown.clone()));
    }

    let total = quiz.questions.len();
    let correct = quiz
        .questions
        .iter()
        .filter(|q| match (answers.get(&q.id), key.get(&q.id)) {
            (Some(given), Some(expected)) => is_correct(q.kind, given, expected),
            _ => false,
        })
        .count();

    let score = if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u8
    };

    Ok(QuizResult {
        correct,
        total,
        score,
        passed: score >= quiz.passing_score,
    })
}
