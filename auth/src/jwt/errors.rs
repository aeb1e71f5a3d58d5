use thiserror::Error;

/// Error type for JWT signing and decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("Token lifetime must be positive and keep expiry within range")]
    InvalidLifetime,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

/// Why a presented credential was refused.
///
/// Kept separate from [`JwtError`] because callers react differently:
/// an expired token means "log in again", an invalid one is a forgery or
/// corruption signal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token is expired")]
    Expired,
}
