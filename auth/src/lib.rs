//! Authentication utilities library
//!
//! Provides the credential machinery shared by services:
//! - Password hashing (Argon2id)
//! - Signed credential issuance and verification (HS256 JWT)
//! - An [`Authenticator`] coordinating both for login flows
//!
//! Services keep their own notion of accounts and map these primitives into
//! their domain errors.
//!
//! # Examples
//!
//! ## Issue and verify
//! ```
//! use std::sync::Arc;
//!
//! use auth::{JwtHandler, TokenIssuer, TokenVerifier};
//! use chrono::Duration;
//!
//! let handler = Arc::new(JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap());
//! let issuer = TokenIssuer::new(Arc::clone(&handler), Duration::hours(24));
//! let verifier = TokenVerifier::new(handler);
//!
//! let token = issuer.issue("account-1").unwrap();
//! assert_eq!(verifier.verify(&token).unwrap().sub, "account-1");
//! ```
//!
//! ## Login flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24)).unwrap();
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let result = auth.authenticate("password123", &hash, "account-1").unwrap();
//! let claims = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "account-1");
//! ```

pub mod authenticator;
pub mod issuer;
pub mod jwt;
pub mod password;
pub mod verifier;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use issuer::TokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::VerificationError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use verifier::TokenVerifier;
