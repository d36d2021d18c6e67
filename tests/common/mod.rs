//! Shared helpers for the HTTP integration tests
//!
//! Each test gets its own server on an ephemeral port, backed by a freshly
//! seeded in-memory store.

#![allow(dead_code)]

use serde_json::{json, Value};
use tokio::net::TcpListener;
use yoga_studio::api::{build_state, serve};
use yoga_studio::config::Config;
use yoga_studio::store::{SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};

pub const TEST_SECRET: &str = "integration-test-secret-for-hs512-signing";

#[derive(Clone)]
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config
}

/// Start the API server in the background and return its base URL
pub async fn spawn_app() -> TestApp {
    let state = build_state(test_config())
        .await
        .expect("Failed to build application state");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let port = listener.local_addr().expect("No local address").port();

    tokio::spawn(async move {
        let _ = serve(listener, state).await;
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Login request failed")
    }

    pub async fn register(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> reqwest::Response {
        self.client
            .post(self.url("/api/auth/register"))
            .json(&json!({
                "email": email,
                "firstName": first_name,
                "lastName": last_name,
                "password": password,
            }))
            .send()
            .await
            .expect("Register request failed")
    }

    /// Log in and return the full JwtResponse body
    pub async fn login_body(&self, email: &str, password: &str) -> Value {
        let response = self.login(email, password).await;
        assert_eq!(response.status(), 200, "login as {} failed", email);
        response.json().await.expect("Invalid login body")
    }

    pub async fn token_for(&self, email: &str, password: &str) -> String {
        self.login_body(email, password).await["token"]
            .as_str()
            .expect("No token in login body")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await
    }

    /// Register a member and return (id, token)
    pub async fn member(&self, email: &str) -> (i64, String) {
        let response = self.register(email, "toto", "toto", "test!1234").await;
        assert_eq!(response.status(), 200, "register {} failed", email);

        let body = self.login_body(email, "test!1234").await;
        let id = body["id"].as_i64().expect("No id in login body");
        let token = body["token"].as_str().expect("No token").to_string();
        (id, token)
    }

    pub async fn get(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post_json(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn put_json(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("PUT request failed")
    }

    pub async fn post(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn delete(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("DELETE request failed")
    }

    /// Create a session led by the first seeded teacher and return its id
    pub async fn create_session(&self, token: &str, name: &str) -> i64 {
        let response = self
            .post_json("/api/session", token, &session_body(name, 1))
            .await;
        assert_eq!(response.status(), 200, "session create failed");
        let body: Value = response.json().await.expect("Invalid session body");
        body["id"].as_i64().expect("No id in session body")
    }
}

pub fn session_body(name: &str, teacher_id: i64) -> Value {
    json!({
        "name": name,
        "date": "2026-11-02T09:30:00Z",
        "teacher_id": teacher_id,
        "description": "Morning vinyasa flow",
        "users": [],
    })
}
