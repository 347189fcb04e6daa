//! Test utilities for integration testing (available with `test-utils` feature).

use crate::ai::GenerativeClient;
use crate::config::{AiConfig, Config};
use crate::{AppState, build_router, seed_default_resources};
use axum_test::TestServer;
use sqlx::PgPool;

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ai: AiConfig {
            // Tests that exercise the generative endpoints point this at a
            // wiremock server instead
            base_url: "http://127.0.0.1:9".parse().unwrap(),
            api_key: Some("test-key".to_string()),
            timeout: std::time::Duration::from_secs(5),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build an [`AppState`] around an existing test pool.
pub async fn test_app_state(pool: PgPool, config: Config) -> AppState {
    let ai = GenerativeClient::new(&config.ai).expect("Failed to create generative client");
    AppState { db: pool, config, ai }
}

/// Spin up a test server against the given pool, with the default catalog seeded.
pub async fn create_test_app(pool: PgPool) -> TestServer {
    create_test_app_with_config(pool, create_test_config()).await
}

/// Like [`create_test_app`], but with the generative backend pointed at `ai_base_url`.
pub async fn create_test_app_with_ai(pool: PgPool, ai_base_url: &str) -> TestServer {
    let mut config = create_test_config();
    config.ai.base_url = ai_base_url.parse().expect("invalid test AI base url");
    create_test_app_with_config(pool, config).await
}

pub async fn create_test_app_with_config(pool: PgPool, config: Config) -> TestServer {
    seed_default_resources(&pool).await.expect("Failed to seed resources");

    let state = test_app_state(pool, config).await;
    let router = build_router(state).expect("Failed to build router");

    TestServer::new(router).expect("Failed to create test server")
}

/// Register a user through the API and return their bearer token.
pub async fn register_user(server: &TestServer, username: &str, email: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": "test-password-123"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<serde_json::Value>()["token"]
        .as_str()
        .expect("registration response missing token")
        .to_string()
}
