use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountProfile;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterAccountCommand;
use crate::domain::errors::StoreError;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Returns
    /// Public projection of the created account
    ///
    /// # Errors
    /// * `Store(DuplicateKey)` - Email is already registered
    /// * `Hashing` - Password could not be hashed
    /// * `Store` - Persistence failed
    async fn register(&self, command: RegisterAccountCommand)
        -> Result<AccountProfile, AccountError>;

    /// Retrieve an account, credential hash included, by email.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `Store` - Persistence failed
    async fn get_account_by_email(&self, email: &EmailAddress) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `DuplicateKey` - Email is already registered
    /// * `Validation` - Store rejected a field
    /// * `Unavailable` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Load an account projection by identifier. The credential hash is
    /// never read on this path.
    ///
    /// # Returns
    /// `None` if no such account exists
    async fn find_profile_by_id(&self, id: &AccountId)
        -> Result<Option<AccountProfile>, StoreError>;

    /// Load a full account by email, for password checks.
    ///
    /// # Returns
    /// `None` if no such account exists
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError>;
}
