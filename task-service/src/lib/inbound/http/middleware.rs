use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use crate::account::models::AccountProfile;
use crate::identity::errors::AuthError;
use crate::inbound::http::errors::ApiError;
use crate::inbound::http::errors::FailureReport;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity attached to a request that passed the authentication gate.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(pub AccountProfile);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the route sits behind `authenticate`.
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .ok_or(ApiError::MissingCredential)
    }
}

/// Authentication gate: verifies the bearer credential, resolves its subject
/// to a live account and attaches it to the request.
///
/// Any failure short-circuits the request; the handler never runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let account = resolve_request_identity(&state, req.headers())
        .await
        .map_err(|e| {
            tracing::warn!(kind = e.kind(), path = %req.uri().path(), "Authentication failed");
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(AuthenticatedAccount(account));

    Ok(next.run(req).await)
}

async fn resolve_request_identity(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AccountProfile, AuthError> {
    let token = extract_bearer_token(headers)?;
    let claims = state.authenticator.verifier().verify(token)?;
    state.identity_resolver.resolve(claims.subject()).await
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// # Errors
/// * `MissingCredential` - Header absent, not UTF-8, another scheme, or empty token
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .ok_or(AuthError::MissingCredential)?;

    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }

    Ok(token)
}

/// Log every normalized failure. Internal detail is logged outside
/// production only and never reaches the response body.
pub async fn report_failures(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if let Some(report) = response.extensions().get::<FailureReport>() {
        let status = response.status();
        let detail = logged_detail(report, state.production);
        let code = status.as_u16();

        if status.is_server_error() {
            tracing::error!(%method, %path, status = code, kind = report.kind, detail, "Request failed");
        } else if status == StatusCode::REQUEST_TIMEOUT {
            tracing::warn!(%method, %path, status = code, kind = report.kind, detail, "Request failed");
        } else {
            tracing::debug!(%method, %path, status = code, kind = report.kind, detail, "Request failed");
        }
    }

    response
}

fn logged_detail(report: &FailureReport, production: bool) -> Option<&str> {
    if production {
        None
    } else {
        report.detail.as_deref()
    }
}
