use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiSuccess;
use super::AppJson;
use super::SessionData;
use crate::account::models::RegisterAccountCommand;
use crate::inbound::http::errors::ApiError;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequestBody>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    let command = RegisterAccountCommand::parse(body.name, body.email, body.password)?;

    let profile = state.account_service.register(command).await?;

    // The new account is authenticated by construction, no password round trip.
    let token = state
        .authenticator
        .issue_token(profile.id)
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        SessionData {
            account: (&profile).into(),
            token,
        },
    ))
}

/// HTTP request body for registration (raw JSON). Missing fields are empty
/// and fail validation with the field's own message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}
