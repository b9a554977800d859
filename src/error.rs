use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid date format: {0:?} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    #[error("due date {due} is before today ({today})")]
    PastDueDate { due: NaiveDate, today: NaiveDate },

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("invalid filter: {0:?}")]
    InvalidFilter(String),

    #[error("invalid menu choice: {0:?}")]
    InvalidMenuChoice(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;
