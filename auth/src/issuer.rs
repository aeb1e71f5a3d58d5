use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Mints signed credentials for already-authenticated subjects.
///
/// Does not authenticate anything itself: the caller vouches for the
/// subject. Output depends only on the subject, the clock and the key.
pub struct TokenIssuer {
    jwt_handler: Arc<JwtHandler>,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(jwt_handler: Arc<JwtHandler>, lifetime: Duration) -> Self {
        Self {
            jwt_handler,
            lifetime,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a credential for `subject`, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `InvalidLifetime` - Expiry would overflow the clock range
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: impl ToString) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Same as [`Self::issue`] with an explicit issue instant.
    pub fn issue_at(&self, subject: impl ToString, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, now, self.lifetime)?;
        self.jwt_handler.encode(&claims)
    }
}
