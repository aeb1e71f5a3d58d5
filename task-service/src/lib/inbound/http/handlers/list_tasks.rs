use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiSuccess;
use super::AppQuery;
use super::TaskData;
use crate::inbound::http::errors::ApiError;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::task::models::TaskFilter;

/// List the caller's tasks, newest first.
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthenticatedAccount(account): AuthenticatedAccount,
    AppQuery(query): AppQuery<ListTasksQuery>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    let filter = TaskFilter::parse(query.status, query.priority)?;

    let tasks = state.task_service.list_tasks(&account.id, filter).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        tasks.iter().map(TaskData::from).collect(),
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTasksQuery {
    status: Option<String>,
    priority: Option<String>,
}
