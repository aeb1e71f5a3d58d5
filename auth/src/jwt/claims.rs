use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::JwtError;

/// Payload carried by every credential.
///
/// Only the registered claims needed to bind a token to an account for a
/// bounded window are present; all three are required when decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject issued at `now` and valid for `lifetime`.
    ///
    /// # Arguments
    /// * `subject` - Account identifier embedded as `sub`
    /// * `now` - Issue instant
    /// * `lifetime` - Validity window added to `now` to obtain `exp`
    ///
    /// # Errors
    /// * `InvalidLifetime` - `now + lifetime` is past the representable range
    pub fn for_subject(
        subject: impl ToString,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or(JwtError::InvalidLifetime)?;

        Ok(Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// A credential is usable only while `now < exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let claims = Claims::for_subject("account-1", now, Duration::hours(24)).unwrap();

        assert_eq!(claims.subject(), "account-1");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.issued_at(), Some(now));
        assert_eq!(claims.expires_at(), Some(now + Duration::hours(24)));
    }

    #[test]
    fn test_is_expired_at() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let claims = Claims::for_subject("account-1", now, Duration::seconds(10)).unwrap();

        assert!(!claims.is_expired_at(now));
        assert!(!claims.is_expired_at(now + Duration::seconds(9)));
        assert!(claims.is_expired_at(now + Duration::seconds(10))); // exactly at expiration
        assert!(claims.is_expired_at(now + Duration::seconds(11)));
    }

    #[test]
    fn test_for_subject_rejects_overflowing_lifetime() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();

        assert_eq!(
            Claims::for_subject("account-1", now, Duration::days(365 * 300_000)),
            Err(JwtError::InvalidLifetime)
        );
    }

    #[test]
    fn test_serialized_shape() {
        let claims = Claims {
            sub: "abc".to_string(),
            iat: 100,
            exp: 200,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(json, r#"{"sub":"abc","iat":100,"exp":200}"#);
    }

    #[test]
    fn test_missing_claim_rejected() {
        let result = serde_json::from_str::<Claims>(r#"{"sub":"abc","iat":100}"#);
        assert!(result.is_err());
    }
}
