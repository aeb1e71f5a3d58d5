use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::jwt::VerificationError;

/// Validates presented credentials and yields their claims.
///
/// Signature and structure are checked before the clock, so a forged token
/// is always reported as [`VerificationError::Invalid`] even when its
/// claimed expiry has also passed.
pub struct TokenVerifier {
    jwt_handler: Arc<JwtHandler>,
}

impl TokenVerifier {
    pub fn new(jwt_handler: Arc<JwtHandler>) -> Self {
        Self { jwt_handler }
    }

    /// Verify `token` against the current time.
    ///
    /// # Errors
    /// * `Invalid` - Malformed token or signature mismatch
    /// * `Expired` - `exp` is not in the future
    pub fn verify(&self, token: &str) -> Result<Claims, VerificationError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, VerificationError> {
        let claims = self
            .jwt_handler
            .decode(token)
            .map_err(|e| VerificationError::Invalid(e.to_string()))?;

        if claims.is_expired_at(now) {
            return Err(VerificationError::Expired);
        }

        Ok(claims)
    }
}
