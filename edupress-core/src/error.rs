//! Error types for EduPress core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Invalid progress {0} (must be between 0 and 100)")]
    InvalidProgress(u8),

    #[error("Invalid rating {0} (must be between 1 and 5)")]
    InvalidRating(u8),

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
