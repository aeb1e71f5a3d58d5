use async_trait::async_trait;

use crate::account::models::AccountProfile;
use crate::identity::errors::AuthError;

/// Maps a verified credential subject to a live account.
#[async_trait]
pub trait IdentityResolverPort: Send + Sync + 'static {
    /// Resolve `subject` to the account it names.
    ///
    /// # Errors
    /// * `UnknownSubject` - No live account, unparseable subject, or the
    ///   lookup itself failed
    async fn resolve(&self, subject: &str) -> Result<AccountProfile, AuthError>;
}
