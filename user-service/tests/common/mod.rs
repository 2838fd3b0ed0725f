#![allow(dead_code)]

use std::sync::Arc;

use auth::AuthConfig;
use auth::Authenticator;
use auth::JwtHandler;
use chrono::Duration;
use serde_json::json;
use user_service::domain::authentication::ports::AuthServicePort;
use user_service::domain::authentication::service::AuthService;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::grpc::UserGrpcService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Authentication settings used by every test application
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        secret: TEST_SECRET.to_vec(),
        token_ttl: Duration::hours(1),
        hash_cost: 1,
    }
}

/// Services wired against a fresh in-memory store
pub fn services() -> (Arc<dyn AuthServicePort>, Arc<dyn UserServicePort>) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let authenticator =
        Arc::new(Authenticator::new(&auth_config()).expect("Failed to build authenticator"));

    (
        Arc::new(AuthService::new(Arc::clone(&repository), authenticator)),
        Arc::new(UserService::new(repository)),
    )
}

/// gRPC service backed by its own in-memory store
pub fn grpc_service() -> UserGrpcService {
    let (auth_service, user_service) = services();
    UserGrpcService::new(auth_service, user_service)
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
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

        let (auth_service, user_service) = services();
        let router = create_router(auth_service, user_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET, Duration::hours(1)),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
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
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register, log in and return (user id, token)
    pub async fn register_and_login(&self, name: &str, email: &str, password: &str) -> (String, String) {
        let body: serde_json::Value = self
            .register(name, email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        let user_id = body["data"]["id"]
            .as_str()
            .expect("Missing user id")
            .to_string();

        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        let token = body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string();

        (user_id, token)
    }
}
