use auth::VerificationError;
use thiserror::Error;

/// Reasons a request could not be bound to an account.
///
/// All of them end the request with 401; the variants stay distinct so
/// logs and client messages can tell them apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("No bearer credential presented")]
    MissingCredential,

    #[error("Credential rejected: {0}")]
    InvalidCredential(String),

    #[error("Credential expired")]
    ExpiredCredential,

    #[error("Credential subject does not resolve to an account: {0}")]
    UnknownSubject(String),
}

impl From<VerificationError> for AuthError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::Invalid(reason) => AuthError::InvalidCredential(reason),
            VerificationError::Expired => AuthError::ExpiredCredential,
        }
    }
}

impl AuthError {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::InvalidCredential(_) => "invalid_credential",
            AuthError::ExpiredCredential => "expired_credential",
            AuthError::UnknownSubject(_) => "unknown_subject",
        }
    }
}
