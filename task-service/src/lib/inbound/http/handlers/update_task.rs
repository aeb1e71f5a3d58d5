use axum::extract::State;
use axum::http::StatusCode;

use super::create_task::TaskRequestBody;
use super::ApiSuccess;
use super::AppJson;
use super::TaskData;
use crate::inbound::http::errors::ApiError;
use crate::inbound::http::ownership::OwnedTask;
use crate::inbound::http::router::AppState;
use crate::task::models::UpdateTaskCommand;

/// Partially update a task the caller owns. Only provided fields change.
pub async fn update_task(
    State(state): State<AppState>,
    OwnedTask(task): OwnedTask,
    AppJson(body): AppJson<TaskRequestBody>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let command = UpdateTaskCommand::parse(body.into())?;

    state
        .task_service
        .update_task(task, command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
