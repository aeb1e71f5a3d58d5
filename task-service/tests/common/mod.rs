#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::JwtHandler;
use auth::TokenIssuer;
use serde_json::json;
use serde_json::Value;
use task_service::account::models::AccountId;
use task_service::inbound::http::router::create_router;
use task_service::inbound::http::router::AppState;
use task_service::outbound::repositories::InMemoryStore;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const FOREIGN_SECRET: &[u8] = b"another-secret-key-nobody-here-should-trust";

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
    /// Shares the server's secret, for forging tokens at arbitrary times
    pub issuer: TokenIssuer,
}

/// A registered account and its credential
pub struct TestAccount {
    pub id: String,
    pub token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::new());
        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, chrono::Duration::hours(24))
                .expect("Failed to create authenticator"),
        );

        let state = AppState::new(Arc::clone(&store), Arc::clone(&store), authenticator, false);
        let router = create_router(state, Duration::from_secs(30));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let issuer = TokenIssuer::new(
            Arc::new(JwtHandler::new(JWT_SECRET).expect("Failed to create JWT handler")),
            chrono::Duration::hours(24),
        );

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
            issuer,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return its id and token
    pub async fn register(&self, name: &str, email: &str) -> TestAccount {
        let response = self
            .post("/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": "secret123"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        TestAccount {
            id: body["data"]["account"]["id"].as_str().unwrap().to_string(),
            token: body["data"]["token"].as_str().unwrap().to_string(),
        }
    }

    /// Create a task and return its id
    pub async fn create_task(&self, token: &str, body: Value) -> String {
        let response = self
            .post_authenticated("/tasks", token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Delete an account behind the server's back, leaving its tokens valid
    pub fn remove_account(&self, id: &str) {
        let id = AccountId::from_string(id).expect("Invalid account id");
        assert!(self.store.remove_account(&id).expect("Store failure"));
    }
}
