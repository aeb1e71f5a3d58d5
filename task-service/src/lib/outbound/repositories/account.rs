use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::corrupt;
use super::store_error;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountName;
use crate::account::models::AccountProfile;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;
use crate::domain::errors::StoreError;

const UNIQUE_FIELDS: &[(&str, &str)] = &[("accounts_email_key", "email")];

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            name: AccountName::new(row.name).map_err(|e| corrupt("name", e))?,
            email: EmailAddress::new(row.email).map_err(|e| corrupt("email", e))?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<ProfileRow> for AccountProfile {
    type Error = StoreError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(AccountProfile {
            id: AccountId(row.id),
            name: AccountName::new(row.name).map_err(|e| corrupt("name", e))?,
            email: EmailAddress::new(row.email).map_err(|e| corrupt("email", e))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id.0)
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(e, UNIQUE_FIELDS))?;

        Ok(account)
    }

    async fn find_profile_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<AccountProfile>, StoreError> {
        sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, UNIQUE_FIELDS))?
        .map(AccountProfile::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, UNIQUE_FIELDS))?
        .map(Account::try_from)
        .transpose()
    }
}
