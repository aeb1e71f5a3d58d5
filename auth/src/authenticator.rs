use std::sync::Arc;

use chrono::Duration;

use crate::issuer::TokenIssuer;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::VerificationError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::verifier::TokenVerifier;

/// Authentication coordinator combining password verification and token
/// issuance/verification over one signing secret.
///
/// Built once at startup and shared; holds no mutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::PasswordError(other),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_lifetime` - How long issued tokens stay valid
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is missing or too short; the process cannot
    ///   serve authenticated traffic without it
    /// * `InvalidLifetime` - Lifetime is zero or negative, so every token
    ///   would be born expired
    pub fn new(jwt_secret: &[u8], token_lifetime: Duration) -> Result<Self, JwtError> {
        if token_lifetime <= Duration::zero() {
            return Err(JwtError::InvalidLifetime);
        }

        let jwt_handler = Arc::new(JwtHandler::new(jwt_secret)?);

        Ok(Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(Arc::clone(&jwt_handler), token_lifetime),
            verifier: TokenVerifier::new(jwt_handler),
        })
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored hash and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher.verify(password, stored_hash)?;

        let access_token = self.issuer.issue(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification, for subjects that were
    /// just authenticated by other means (e.g. registration).
    pub fn issue_token(&self, subject: impl ToString) -> Result<String, JwtError> {
        self.issuer.issue(subject)
    }

    /// Validate a token and return its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, VerificationError> {
        self.verifier.verify(token)
    }
}
