use auth::AuthenticationError;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiSuccess;
use super::AppJson;
use super::SessionData;
use crate::account::errors::AccountError;
use crate::account::models::LoginCommand;
use crate::inbound::http::errors::ApiError;
use crate::inbound::http::router::AppState;

/// Exchange email and password for a credential.
///
/// Unknown email and wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequestBody>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    let command = LoginCommand::parse(body.email, body.password)?;

    let account = state
        .account_service
        .get_account_by_email(&command.email)
        .await
        .map_err(|e| match e {
            AccountError::NotFound(_) => ApiError::InvalidLogin,
            other => ApiError::from(other),
        })?;

    let result = state
        .authenticator
        .authenticate(&command.password, &account.password_hash, account.id)
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => ApiError::InvalidLogin,
            AuthenticationError::PasswordError(err) => {
                ApiError::Internal(format!("Password verification failed: {}", err))
            }
            AuthenticationError::JwtError(err) => {
                ApiError::Internal(format!("Token generation failed: {}", err))
            }
        })?;

    tracing::info!(account_id = %account.id, "Account logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionData {
            account: (&account.profile()).into(),
            token: result.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}
