use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use starter_api::config::{Config, Environment};
use starter_api::db::{MemoryUserStore, UserStore};
use starter_api::services::ServiceRegistry;

/// A running test server backed by its own in-memory user table.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryUserStore>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn api(&self, path: &str) -> String {
        self.url(&format!("/api/v0{path}"))
    }

    /// Create a user through the API, return (body, status).
    pub async fn create_user(&self, body: &Value) -> (Value, StatusCode) {
        self.post(&self.api("/users"), body).await
    }

    /// Create `n` users `user1@example.com..` and assert each succeeds.
    pub async fn seed_users(&self, n: usize) {
        for i in 1..=n {
            let (body, status) = self
                .create_user(&json!({
                    "name": format!("User{i} Test{i}"),
                    "email": format!("user{i}@example.com"),
                    "password": "password123",
                    "firstName": format!("User{i}"),
                    "lastName": format!("Test{i}"),
                }))
                .await;
            assert_eq!(status, StatusCode::CREATED, "seed user {i} failed: {body}");
        }
    }

    pub async fn get(&self, url: &str) -> (Value, StatusCode) {
        let resp = self.client.get(url).send().await.expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, url: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, url: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(url)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, url: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(url)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(environment: Environment) -> Config {
    Config {
        database_url: None,
        environment,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        db_max_connections: 1,
    }
}

/// Spawn the app on a random port over a fresh memory store.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryUserStore::new());
    spawn_with_store(store.clone(), Environment::Test, store).await
}

/// Spawn the app over an arbitrary store; `memory` is kept for direct inspection.
pub async fn spawn_with_store(
    user_store: Arc<dyn UserStore>,
    environment: Environment,
    memory: Arc<MemoryUserStore>,
) -> TestApp {
    let services = ServiceRegistry::new(user_store);
    let app = starter_api::build_app(services, test_config(environment));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store: memory,
    }
}
