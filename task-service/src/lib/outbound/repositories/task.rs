use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::corrupt;
use super::store_error;
use crate::account::models::AccountId;
use crate::domain::errors::StoreError;
use crate::task::models::Task;
use crate::task::models::TaskDescription;
use crate::task::models::TaskFilter;
use crate::task::models::TaskId;
use crate::task::models::TaskPriority;
use crate::task::models::TaskStatus;
use crate::task::models::TaskTitle;
use crate::task::ports::TaskRepository;

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TaskRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    status: String,
    priority: String,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId(row.id),
            owner: AccountId(row.owner_id),
            title: TaskTitle::new(row.title).map_err(|e| corrupt("title", e))?,
            description: TaskDescription::new(row.description)
                .map_err(|e| corrupt("description", e))?,
            status: row.status.parse::<TaskStatus>().map_err(|e| corrupt("status", e))?,
            priority: row.priority.parse::<TaskPriority>().map_err(|e| corrupt("priority", e))?,
            due_date: row.due_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, owner_id, title, description, status, priority, due_date, created_at, updated_at";

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, owner_id, title, description, status, priority, due_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.id.0)
        .bind(task.owner.0)
        .bind(task.title.as_str())
        .bind(task.description.as_str())
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(e, &[]))?;

        Ok(task)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, &[]))?
        .map(Task::try_from)
        .transpose()
    }

    async fn list_by_owner(
        &self,
        owner: &AccountId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, StoreError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            SELECT {}
            FROM tasks
            WHERE owner_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::TEXT IS NULL OR priority = $3)
            ORDER BY created_at DESC
            "#,
            SELECT_COLUMNS
        ))
        .bind(owner.0)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.priority.map(|p| p.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, &[]))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update(&self, task: Task) -> Result<Option<Task>, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, status = $4, priority = $5, due_date = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(task.description.as_str())
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(e, &[]))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(task))
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, &[]))?;

        Ok(result.rows_affected() > 0)
    }
}
