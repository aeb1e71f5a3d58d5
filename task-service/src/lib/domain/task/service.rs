use std::sync::Arc;

use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::domain::ownership::ensure_owned_by;
use crate::task::errors::TaskError;
use crate::task::models::CreateTaskCommand;
use crate::task::models::Task;
use crate::task::models::TaskFilter;
use crate::task::models::TaskId;
use crate::task::models::UpdateTaskCommand;
use crate::task::ports::TaskRepository;
use crate::task::ports::TaskServicePort;

/// Domain service implementation for task operations.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn create_task(
        &self,
        owner: &AccountId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError> {
        let task = self.repository.create(Task::new(*owner, command)).await?;
        tracing::info!(task_id = %task.id, owner = %task.owner, "Task created");
        Ok(task)
    }

    async fn list_tasks(
        &self,
        owner: &AccountId,
        filter: TaskFilter,
    ) -> Result<Vec<Task>, TaskError> {
        Ok(self.repository.list_by_owner(owner, &filter).await?)
    }

    async fn get_owned_task(&self, id: &TaskId, requester: &AccountId) -> Result<Task, TaskError> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        ensure_owned_by(&task, requester).map_err(|e| {
            tracing::warn!(task_id = %id, requester = %requester, "Task ownership check failed");
            TaskError::Forbidden(e)
        })?;

        Ok(task)
    }

    async fn update_task(
        &self,
        mut task: Task,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        let id = task.id;
        task.apply(command);

        self.repository
            .update(task)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    async fn delete_task(&self, task: &Task) -> Result<(), TaskError> {
        if self.repository.delete(&task.id).await? {
            tracing::info!(task_id = %task.id, "Task deleted");
            Ok(())
        } else {
            Err(TaskError::NotFound(task.id.to_string()))
        }
    }
}
