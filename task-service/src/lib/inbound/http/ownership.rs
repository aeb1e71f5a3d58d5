//! Ownership gate for task-scoped routes.
//!
//! Runs after [`authenticate`](super::middleware::authenticate): loads the
//! task named by the `:id` path segment and lets the request through only if
//! the authenticated account owns it. The loaded task travels with the
//! request as [`OwnedTask`] so handlers do not fetch it again.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use super::errors::ApiError;
use super::handlers::AppPath;
use super::middleware::AuthenticatedAccount;
use super::router::AppState;
use crate::task::errors::TaskError;
use crate::task::models::Task;
use crate::task::models::TaskId;

/// A task the requester has been verified to own.
#[derive(Debug, Clone)]
pub struct OwnedTask(pub Task);

#[async_trait]
impl<S> FromRequestParts<S> for OwnedTask
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<OwnedTask>()
            .cloned()
            .ok_or_else(|| ApiError::Internal("route is missing the ownership gate".to_string()))
    }
}

pub async fn require_task_ownership(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AuthenticatedAccount(account): AuthenticatedAccount,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let task_id = TaskId::from_string(&id).map_err(TaskError::from)?;

    let task = state
        .task_service
        .get_owned_task(&task_id, &account.id)
        .await?;

    req.extensions_mut().insert(OwnedTask(task));

    Ok(next.run(req).await)
}
