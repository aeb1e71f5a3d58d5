use std::sync::Arc;

use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::account::models::AccountProfile;
use crate::account::ports::AccountRepository;
use crate::identity::errors::AuthError;
use crate::identity::ports::IdentityResolverPort;

/// Resolves credential subjects through the account store.
///
/// Fails closed: a store failure is a denial and is never retried.
pub struct IdentityResolver<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
}

impl<AR> IdentityResolver<AR>
where
    AR: AccountRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<AR> IdentityResolverPort for IdentityResolver<AR>
where
    AR: AccountRepository,
{
    async fn resolve(&self, subject: &str) -> Result<AccountProfile, AuthError> {
        let account_id = AccountId::from_string(subject).map_err(|e| {
            tracing::warn!(subject, error = %e, "Credential subject is not an account id");
            AuthError::UnknownSubject(subject.to_string())
        })?;

        match self.repository.find_profile_by_id(&account_id).await {
            Ok(Some(profile)) => Ok(profile),
            Ok(None) => Err(AuthError::UnknownSubject(subject.to_string())),
            Err(e) => {
                tracing::error!(account_id = %account_id, error = %e, "Identity lookup failed");
                Err(AuthError::UnknownSubject(subject.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::account::models::Account;
    use crate::account::models::AccountName;
    use crate::account::models::EmailAddress;
    use crate::domain::errors::StoreError;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, StoreError>;
            async fn find_profile_by_id(&self, id: &AccountId) -> Result<Option<AccountProfile>, StoreError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError>;
        }
    }

    fn profile(id: AccountId) -> AccountProfile {
        let now = Utc::now();
        AccountProfile {
            id,
            name: AccountName::new("Ada".to_string()).unwrap(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_resolve_live_account() {
        let mut repository = MockTestAccountRepository::new();
        let account_id = AccountId::new();
        repository
            .expect_find_profile_by_id()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(move |id| Ok(Some(profile(*id))));

        let resolver = IdentityResolver::new(Arc::new(repository));

        let resolved = resolver.resolve(&account_id.to_string()).await.unwrap();
        assert_eq!(resolved.id, account_id);
    }

    #[tokio::test]
    async fn test_resolve_deleted_account() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_profile_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let resolver = IdentityResolver::new(Arc::new(repository));
        let subject = AccountId::new().to_string();

        assert_eq!(
            resolver.resolve(&subject).await,
            Err(AuthError::UnknownSubject(subject.clone()))
        );
    }

    #[tokio::test]
    async fn test_resolve_non_uuid_subject_skips_store() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_profile_by_id().times(0);

        let resolver = IdentityResolver::new(Arc::new(repository));

        assert!(matches!(
            resolver.resolve("admin").await,
            Err(AuthError::UnknownSubject(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_store_failure_fails_closed() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_profile_by_id()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection reset".to_string())));

        let resolver = IdentityResolver::new(Arc::new(repository));

        assert!(matches!(
            resolver.resolve(&AccountId::new().to_string()).await,
            Err(AuthError::UnknownSubject(_))
        ));
    }
}
