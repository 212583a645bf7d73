//! Error types for the dream board and its file inputs

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DreamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dream not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid lexicon: {0}")]
    Lexicon(String),
}

pub type Result<T> = std::result::Result<T, DreamError>;
