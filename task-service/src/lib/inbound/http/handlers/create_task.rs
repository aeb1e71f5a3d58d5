use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiSuccess;
use super::AppJson;
use super::TaskData;
use crate::inbound::http::errors::ApiError;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::task::models::CreateTaskCommand;
use crate::task::models::TaskInput;

pub async fn create_task(
    State(state): State<AppState>,
    AuthenticatedAccount(account): AuthenticatedAccount,
    AppJson(body): AppJson<TaskRequestBody>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let command = CreateTaskCommand::parse(body.into())?;

    state
        .task_service
        .create_task(&account.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body for creating or updating a task (raw JSON).
///
/// An `owner` field, if sent, is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskRequestBody {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    due_date: Option<String>,
}

impl From<TaskRequestBody> for TaskInput {
    fn from(body: TaskRequestBody) -> Self {
        TaskInput {
            title: body.title,
            description: body.description,
            status: body.status,
            priority: body.priority,
            due_date: body.due_date,
        }
    }
}
