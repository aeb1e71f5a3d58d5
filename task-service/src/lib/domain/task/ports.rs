use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::domain::errors::StoreError;
use crate::task::errors::TaskError;
use crate::task::models::CreateTaskCommand;
use crate::task::models::Task;
use crate::task::models::TaskFilter;
use crate::task::models::TaskId;
use crate::task::models::UpdateTaskCommand;

/// Port for task domain service operations.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a task owned by `owner`.
    ///
    /// # Errors
    /// * `Store` - Persistence failed
    async fn create_task(
        &self,
        owner: &AccountId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError>;

    /// List the tasks of `owner`, newest first.
    async fn list_tasks(&self, owner: &AccountId, filter: TaskFilter)
        -> Result<Vec<Task>, TaskError>;

    /// Load a task on behalf of `requester`, enforcing ownership.
    ///
    /// # Errors
    /// * `NotFound` - No task with this ID
    /// * `Forbidden` - Task exists but belongs to another account
    /// * `Store` - Persistence failed
    async fn get_owned_task(&self, id: &TaskId, requester: &AccountId) -> Result<Task, TaskError>;

    /// Apply an update to a task previously loaded through
    /// [`TaskServicePort::get_owned_task`].
    ///
    /// # Errors
    /// * `NotFound` - Task vanished since it was loaded
    /// * `Store` - Persistence failed
    async fn update_task(&self, task: Task, command: UpdateTaskCommand)
        -> Result<Task, TaskError>;

    /// Delete a task previously loaded through
    /// [`TaskServicePort::get_owned_task`].
    async fn delete_task(&self, task: &Task) -> Result<(), TaskError>;
}

/// Persistence operations for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn create(&self, task: Task) -> Result<Task, StoreError>;

    /// # Returns
    /// `None` if no such task exists
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, StoreError>;

    /// Tasks of `owner` matching `filter`, ordered by creation time descending.
    async fn list_by_owner(
        &self,
        owner: &AccountId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, StoreError>;

    /// Overwrite the mutable fields of an existing task. The owner column is
    /// never written.
    ///
    /// # Returns
    /// `None` if the task no longer exists
    async fn update(&self, task: Task) -> Result<Option<Task>, StoreError>;

    /// # Returns
    /// Whether a task was removed
    async fn delete(&self, id: &TaskId) -> Result<bool, StoreError>;
}
