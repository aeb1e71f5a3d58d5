use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::errors::ApiError;
use crate::inbound::http::ownership::OwnedTask;
use crate::inbound::http::router::AppState;

pub async fn delete_task(
    State(state): State<AppState>,
    OwnedTask(task): OwnedTask,
) -> Result<ApiSuccess<DeleteTaskResponseData>, ApiError> {
    state.task_service.delete_task(&task).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteTaskResponseData {
            id: task.id.to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTaskResponseData {
    pub id: String,
}
