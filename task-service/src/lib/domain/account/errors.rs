use thiserror::Error;

use crate::domain::errors::StoreError;
use crate::domain::errors::ValidationError;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for AccountName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountNameError {
    #[error("Please provide a name")]
    Missing,

    #[error("Name must be between {min} and {max} characters")]
    Length { min: usize, max: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Please provide an email")]
    Missing,

    #[error("Please provide a valid email")]
    InvalidFormat,
}

/// Error for password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Please provide a password")]
    Missing,

    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },
}

/// Top-level error for account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid account data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
