//! Client-facing failure normalization.
//!
//! Every error that leaves the HTTP layer is an [`ApiError`]; the mapping
//! below is the only place that decides status codes and messages. Internal
//! detail is attached to the response as a [`FailureReport`] extension for
//! logging and never serialized.

use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::domain::errors::StoreError;
use crate::domain::errors::ValidationError;
use crate::identity::errors::AuthError;
use crate::task::errors::TaskError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    MissingCredential,
    InvalidCredential(String),
    ExpiredCredential,
    UnknownSubject(String),
    InvalidLogin,
    Forbidden(String),
    ResourceNotFound(String),
    MalformedIdentifier(String),
    RouteNotFound,
    DuplicateKey { field: String },
    Validation(Vec<String>),
    Timeout,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCredential
            | ApiError::InvalidCredential(_)
            | ApiError::ExpiredCredential
            | ApiError::UnknownSubject(_)
            | ApiError::InvalidLogin => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound(_)
            | ApiError::MalformedIdentifier(_)
            | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicateKey { .. } | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client. Never contains internal detail.
    pub fn message(&self) -> String {
        match self {
            ApiError::MissingCredential => {
                "Not authorized to access this route. Please provide a valid token.".to_string()
            }
            ApiError::InvalidCredential(_) => "Invalid token. Please login again.".to_string(),
            ApiError::ExpiredCredential => "Token expired. Please login again.".to_string(),
            ApiError::UnknownSubject(_) => "User not found. Token may be invalid.".to_string(),
            ApiError::InvalidLogin => "Invalid email or password".to_string(),
            ApiError::Forbidden(_) => "Not authorized to access this resource".to_string(),
            ApiError::ResourceNotFound(_) | ApiError::MalformedIdentifier(_) => {
                "Resource not found".to_string()
            }
            ApiError::RouteNotFound => "Route not found".to_string(),
            ApiError::DuplicateKey { field } => format!("{} already exists", capitalize(field)),
            ApiError::Validation(messages) => messages.join(", "),
            ApiError::Timeout => "Request timed out".to_string(),
            ApiError::Internal(_) => "Server Error".to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingCredential => "missing_credential",
            ApiError::InvalidCredential(_) => "invalid_credential",
            ApiError::ExpiredCredential => "expired_credential",
            ApiError::UnknownSubject(_) => "unknown_subject",
            ApiError::InvalidLogin => "invalid_login",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::ResourceNotFound(_) => "resource_not_found",
            ApiError::MalformedIdentifier(_) => "malformed_identifier",
            ApiError::RouteNotFound => "route_not_found",
            ApiError::DuplicateKey { .. } => "duplicate_key",
            ApiError::Validation(_) => "validation",
            ApiError::Timeout => "timeout",
            ApiError::Internal(_) => "internal",
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            ApiError::InvalidCredential(detail)
            | ApiError::UnknownSubject(detail)
            | ApiError::Forbidden(detail)
            | ApiError::ResourceNotFound(detail)
            | ApiError::MalformedIdentifier(detail)
            | ApiError::Internal(detail) => Some(detail.clone()),
            _ => None,
        }
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Internal side of a failed response, read by the reporting middleware.
#[derive(Debug, Clone)]
pub struct FailureReport {
    pub kind: &'static str,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiErrorBody {
            success: false,
            message: self.message(),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(FailureReport {
            kind: self.kind(),
            detail: self.detail(),
        });
        response
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential => ApiError::MissingCredential,
            AuthError::InvalidCredential(reason) => ApiError::InvalidCredential(reason),
            AuthError::ExpiredCredential => ApiError::ExpiredCredential,
            AuthError::UnknownSubject(subject) => ApiError::UnknownSubject(subject),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(errors: ValidationError) -> Self {
        ApiError::Validation(errors.messages())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedId(id) => ApiError::MalformedIdentifier(id),
            StoreError::DuplicateKey { field } => ApiError::DuplicateKey { field },
            StoreError::Validation(errors) => ApiError::from(errors),
            StoreError::Unavailable(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(errors) => ApiError::from(errors),
            AccountError::NotFound(email) => ApiError::ResourceNotFound(email),
            AccountError::Hashing(detail) => ApiError::Internal(detail),
            AccountError::Store(store) => ApiError::from(store),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(errors) => ApiError::from(errors),
            TaskError::MalformedId(e) => ApiError::MalformedIdentifier(e.to_string()),
            TaskError::NotFound(id) => ApiError::ResourceNotFound(id),
            TaskError::Forbidden(e) => ApiError::Forbidden(e.to_string()),
            TaskError::Store(store) => ApiError::from(store),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

/// Path segments only carry resource identifiers, so any path that fails to
/// decode names a resource that cannot exist.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::MalformedIdentifier(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn render(error: ApiError) -> (StatusCode, serde_json::Value, FailureReport) {
        let response = error.into_response();
        let status = response.status();
        let report = response
            .extensions()
            .get::<FailureReport>()
            .cloned()
            .expect("Failure report attached");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap(), report)
    }

    #[tokio::test]
    async fn test_credential_failures_are_401_with_distinct_messages() {
        let (missing, missing_body, _) = render(ApiError::MissingCredential).await;
        let (invalid, invalid_body, _) =
            render(ApiError::InvalidCredential("InvalidSignature".to_string())).await;
        let (expired, expired_body, _) = render(ApiError::ExpiredCredential).await;
        let (unknown, unknown_body, _) = render(ApiError::UnknownSubject("x".to_string())).await;

        for status in [missing, invalid, expired, unknown] {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
        assert!(missing_body["message"]
            .as_str()
            .unwrap()
            .starts_with("Not authorized"));
        assert_eq!(invalid_body["message"], "Invalid token. Please login again.");
        assert_eq!(expired_body["message"], "Token expired. Please login again.");
        assert_ne!(invalid_body["message"], expired_body["message"]);
        assert_eq!(unknown_body["success"], false);
    }

    #[tokio::test]
    async fn test_envelope_has_exactly_two_fields() {
        let (_, body, _) = render(ApiError::Forbidden("account a".to_string())).await;

        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Not authorized to access this resource");
    }

    #[tokio::test]
    async fn test_store_failures() {
        let (status, body, _) = render(ApiError::from(StoreError::DuplicateKey {
            field: "email".to_string(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email already exists");

        let mut errors = ValidationError::default();
        errors.push("title", "Please provide a task title");
        errors.push("status", "Status is invalid");
        let (status, body, _) = render(ApiError::from(StoreError::Validation(errors))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please provide a task title, Status is invalid");

        let (status, body, _) =
            render(ApiError::from(StoreError::MalformedId("abc".to_string()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Resource not found");
    }

    #[tokio::test]
    async fn test_internal_detail_never_in_body() {
        let (status, body, report) = render(ApiError::from(StoreError::Unavailable(
            "password authentication failed for user postgres".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server Error");
        assert!(!body.to_string().contains("postgres"));
        assert_eq!(report.kind, "internal");
        assert!(report.detail.unwrap().contains("postgres"));
    }

    #[tokio::test]
    async fn test_forbidden_and_not_found_are_distinct() {
        let (forbidden, _, _) = render(ApiError::Forbidden("x".to_string())).await;
        let (missing, _, _) = render(ApiError::ResourceNotFound("x".to_string())).await;

        assert_eq!(forbidden, StatusCode::FORBIDDEN);
        assert_eq!(missing, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_timeout_is_enveloped() {
        let (status, body, report) = render(ApiError::Timeout).await;

        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Request timed out");
        assert_eq!(report.kind, "timeout");
        assert!(report.detail.is_none());
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let errors = [
            ApiError::MissingCredential,
            ApiError::ExpiredCredential,
            ApiError::DuplicateKey {
                field: "email".to_string(),
            },
            ApiError::Internal("a".to_string()),
        ];

        for error in errors {
            assert_eq!(error.status(), error.clone().status());
            assert_eq!(error.message(), error.clone().message());
        }
        assert_eq!(
            ApiError::Internal("a".to_string()).message(),
            ApiError::Internal("b".to_string()).message()
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("email"), "Email");
        assert_eq!(capitalize(""), "");
    }
}
