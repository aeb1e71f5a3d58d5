use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::BoxError;
use axum::Router;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::errors::ApiError;
use super::handlers::create_task::create_task;
use super::handlers::delete_task::delete_task;
use super::handlers::health::health;
use super::handlers::list_tasks::list_tasks;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_task::update_task;
use super::middleware::authenticate;
use super::middleware::report_failures;
use super::ownership::require_task_ownership;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::service::AccountService;
use crate::identity::ports::IdentityResolverPort;
use crate::identity::resolver::IdentityResolver;
use crate::task::ports::TaskRepository;
use crate::task::ports::TaskServicePort;
use crate::task::service::TaskService;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub task_service: Arc<dyn TaskServicePort>,
    pub identity_resolver: Arc<dyn IdentityResolverPort>,
    pub authenticator: Arc<Authenticator>,
    /// Suppresses internal failure detail in logs.
    pub production: bool,
}

impl AppState {
    /// Wire the domain services over the given repositories.
    pub fn new<AR, TR>(
        account_repository: Arc<AR>,
        task_repository: Arc<TR>,
        authenticator: Arc<Authenticator>,
        production: bool,
    ) -> Self
    where
        AR: AccountRepository,
        TR: TaskRepository,
    {
        Self {
            account_service: Arc::new(AccountService::new(
                Arc::clone(&account_repository),
                Arc::clone(&authenticator),
            )),
            task_service: Arc::new(TaskService::new(task_repository)),
            identity_resolver: Arc::new(IdentityResolver::new(account_repository)),
            authenticator,
            production,
        }
    }
}

pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let public_routes = Router::new()
        .route("/", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    // Layers run bottom-up: authentication first, then ownership.
    let owned_task_routes = Router::new()
        .route("/tasks/:id", put(update_task).delete(delete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_task_ownership,
        ));

    let protected_routes = Router::new()
        .route("/tasks", post(create_task).get(list_tasks))
        .merge(owned_task_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(route_not_found)
        // `Router::layer` needs an infallible service; the timeout carries its error handler.
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), report_failures))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use async_trait::async_trait;
    use axum::http::header::AUTHORIZATION;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::StatusCode;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::account::models::Account;
    use crate::account::models::AccountId;
    use crate::account::models::AccountName;
    use crate::account::models::AccountProfile;
    use crate::account::models::EmailAddress;
    use crate::domain::errors::StoreError;
    use crate::outbound::repositories::InMemoryStore;
    use crate::task::models::CreateTaskCommand;
    use crate::task::models::Task;
    use crate::task::models::TaskFilter;
    use crate::task::models::TaskId;
    use crate::task::models::TaskInput;

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(
            Authenticator::new(
                b"router-test-secret-with-at-least-32-bytes",
                chrono::Duration::hours(1),
            )
            .unwrap(),
        )
    }

    fn app() -> Router {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(Arc::clone(&store), store, authenticator(), false);
        create_router(state, Duration::from_secs(5))
    }

    async fn send_to(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        send_to(app(), request).await
    }

    /// Account store whose profile lookup outlives any sane request timeout.
    struct SlowAccounts;

    #[async_trait]
    impl AccountRepository for SlowAccounts {
        async fn create(&self, account: Account) -> Result<Account, StoreError> {
            Ok(account)
        }

        async fn find_profile_by_id(
            &self,
            _id: &AccountId,
        ) -> Result<Option<AccountProfile>, StoreError> {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok(None)
        }

        async fn find_by_email(&self, _email: &EmailAddress) -> Result<Option<Account>, StoreError> {
            Ok(None)
        }
    }

    /// Task store that counts point lookups.
    struct CountingTasks {
        inner: Arc<InMemoryStore>,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl TaskRepository for CountingTasks {
        async fn create(&self, task: Task) -> Result<Task, StoreError> {
            TaskRepository::create(&*self.inner, task).await
        }

        async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id).await
        }

        async fn list_by_owner(
            &self,
            owner: &AccountId,
            filter: &TaskFilter,
        ) -> Result<Vec<Task>, StoreError> {
            self.inner.list_by_owner(owner, filter).await
        }

        async fn update(&self, task: Task) -> Result<Option<Task>, StoreError> {
            self.inner.update(task).await
        }

        async fn delete(&self, id: &TaskId) -> Result<bool, StoreError> {
            self.inner.delete(id).await
        }
    }

    async fn seed_owner_and_task(store: &InMemoryStore) -> (AccountId, TaskId) {
        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            name: AccountName::new("Ada".to_string()).unwrap(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
            password_hash: "unused".to_string(),
            created_at: now,
            updated_at: now,
        };
        let owner = AccountRepository::create(store, account).await.unwrap().id;

        let command = CreateTaskCommand::parse(TaskInput {
            title: Some("Write report".to_string()),
            ..TaskInput::default()
        })
        .unwrap();
        let task = TaskRepository::create(store, Task::new(owner, command))
            .await
            .unwrap();

        (owner, task.id)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_fallback_is_normalized() {
        let (status, body) = send(Request::get("/nowhere").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route not found");
    }

    #[tokio::test]
    async fn test_task_routes_require_credential() {
        let (status, _) = send(Request::get("/tasks").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            Request::put("/tasks/not-a-uuid")
                .header(AUTHORIZATION, "Bearer garbage")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token. Please login again.");
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_envelope() {
        let authenticator = authenticator();
        let token = authenticator.issue_token(AccountId::new()).unwrap();
        let state = AppState::new(
            Arc::new(SlowAccounts),
            Arc::new(InMemoryStore::new()),
            authenticator,
            false,
        );
        let app = create_router(state, Duration::from_millis(100));

        let (status, body) = send_to(
            app,
            Request::get("/tasks")
                .header(AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Request timed out");
    }

    #[tokio::test]
    async fn test_owned_routes_load_task_once() {
        let store = Arc::new(InMemoryStore::new());
        let (owner, task_id) = seed_owner_and_task(&store).await;
        let tasks = Arc::new(CountingTasks {
            inner: Arc::clone(&store),
            lookups: AtomicUsize::new(0),
        });
        let authenticator = authenticator();
        let token = authenticator.issue_token(owner).unwrap();
        let state = AppState::new(store, Arc::clone(&tasks), authenticator, false);
        let app = create_router(state, Duration::from_secs(5));

        let (status, body) = send_to(
            app.clone(),
            Request::put(format!("/tasks/{}", task_id))
                .header(AUTHORIZATION, format!("Bearer {}", token))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"status":"completed"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "completed");
        assert_eq!(tasks.lookups.load(Ordering::SeqCst), 1);

        let (status, _) = send_to(
            app,
            Request::delete(format!("/tasks/{}", task_id))
                .header(AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tasks.lookups.load(Ordering::SeqCst), 2);
    }
}
