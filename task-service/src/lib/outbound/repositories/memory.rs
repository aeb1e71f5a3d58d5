use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use async_trait::async_trait;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountProfile;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;
use crate::domain::errors::StoreError;
use crate::task::models::Task;
use crate::task::models::TaskFilter;
use crate::task::models::TaskId;
use crate::task::ports::TaskRepository;

/// Process-local store implementing both repositories.
///
/// Same contract as the PostgreSQL adapters, including the unique email
/// constraint and cascading task removal. Locks are never held across an
/// `.await`.
#[derive(Default)]
pub struct InMemoryStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
        lock.read()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
        lock.write()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    /// Remove an account and everything it owns.
    ///
    /// # Returns
    /// Whether the account existed
    pub fn remove_account(&self, id: &AccountId) -> Result<bool, StoreError> {
        let removed = Self::write(&self.accounts)?.remove(id).is_some();
        if removed {
            Self::write(&self.tasks)?.retain(|_, task| task.owner != *id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = Self::write(&self.accounts)?;

        if accounts.values().any(|existing| existing.email == account.email) {
            return Err(StoreError::DuplicateKey {
                field: "email".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_profile_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<AccountProfile>, StoreError> {
        Ok(Self::read(&self.accounts)?.get(id).map(Account::profile))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError> {
        Ok(Self::read(&self.accounts)?
            .values()
            .find(|account| account.email == *email)
            .cloned())
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn create(&self, task: Task) -> Result<Task, StoreError> {
        if !Self::read(&self.accounts)?.contains_key(&task.owner) {
            return Err(StoreError::Unavailable(format!(
                "Task owner {} does not exist",
                task.owner
            )));
        }

        Self::write(&self.tasks)?.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        Ok(Self::read(&self.tasks)?.get(id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &AccountId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = Self::read(&self.tasks)?
            .values()
            .filter(|task| task.owner == *owner && filter.matches(task))
            .cloned()
            .collect();

        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update(&self, task: Task) -> Result<Option<Task>, StoreError> {
        let mut tasks = Self::write(&self.tasks)?;

        match tasks.get_mut(&task.id) {
            Some(stored) => {
                let owner = stored.owner;
                *stored = Task { owner, ..task };
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, StoreError> {
        Ok(Self::write(&self.tasks)?.remove(id).is_some())
    }
}
