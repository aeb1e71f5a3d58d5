use thiserror::Error;

use crate::domain::errors::StoreError;
use crate::domain::errors::ValidationError;
use crate::domain::ownership::NotOwner;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Please provide a task title")]
    Missing,

    #[error("Title cannot exceed {max} characters")]
    TooLong { max: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Description cannot exceed {max} characters")]
    TooLong { max: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Status must be one of: pending, in-progress, completed")]
pub struct StatusError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Priority must be one of: low, medium, high")]
pub struct PriorityError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Due date must be a valid ISO 8601 date-time")]
pub struct DueDateError;

/// Top-level error for task operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid task data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid task ID: {0}")]
    MalformedId(#[from] TaskIdError),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Task access denied: {0}")]
    Forbidden(#[from] NotOwner),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
