//! Registration, login, and the current-user endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    api::models::users::{AuthResponse, CurrentUser, LoginRequest, RegisterRequest, UserResponse},
    auth::{password, session},
    db::{
        handlers::{Repository, Users},
        models::users::UserCreateDBRequest,
    },
    errors::{Error, Result},
};

/// Register a new user account
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Json(request): Json<RegisterRequest>) -> Result<(StatusCode, Json<AuthResponse>)> {
    if !state.config.auth.allow_registration {
        return Err(Error::BadRequest {
            message: "User registration is disabled".to_string(),
        });
    }

    let username = request.username.trim().to_string();
    let email = request.email.trim().to_lowercase();
    if username.is_empty() {
        return Err(Error::BadRequest {
            message: "Username cannot be empty".to_string(),
        });
    }
    if email.is_empty() || !email.contains('@') {
        return Err(Error::BadRequest {
            message: "A valid email address is required".to_string(),
        });
    }

    // Validate password length
    let password_config = &state.config.auth.password;
    if request.password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if request.password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut tx);

    // Check if user with this email already exists
    if user_repo.get_user_by_email(&email).await?.is_some() {
        return Err(Error::BadRequest {
            message: "An account with this email address already exists".to_string(),
        });
    }

    // Hash the password on a blocking thread to avoid blocking async runtime
    let password = request.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string(&password))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let created_user = user_repo
        .create(&UserCreateDBRequest {
            username,
            email,
            password_hash,
        })
        .await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let current_user = CurrentUser::from(created_user.clone());
    let token = session::create_session_token(&current_user, &state.config)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(created_user),
        }),
    ))
}

/// Login with email and password
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<AuthResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut pool_conn);

    let user = user_repo
        .get_user_by_email(request.email.trim().to_lowercase().as_str())
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        })?;

    // Verify password on a blocking thread to avoid blocking async runtime
    let password = request.password.clone();
    let hash = user.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_string(&password, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !is_valid {
        return Err(Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        });
    }

    let current_user = CurrentUser::from(user.clone());
    let token = session::create_session_token(&current_user, &state.config)?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// The currently authenticated user
#[tracing::instrument(skip_all)]
pub async fn me(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut pool_conn);

    // Token may outlive the account; treat a missing row as a stale session
    let user = user_repo
        .get_by_id(current_user.id)
        .await?
        .ok_or(Error::Unauthenticated { message: None })?;

    Ok(Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, register_user};
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;

    #[test_log::test(sqlx::test)]
    async fn test_register_login_me_flow(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "asha",
                "email": "asha@example.com",
                "password": "super-secret"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["user"]["username"], "asha");

        let response = server
            .post("/api/auth/login")
            .json(&json!({"email": "asha@example.com", "password": "super-secret"}))
            .await;
        response.assert_status_ok();
        let token = response.json::<serde_json::Value>()["token"].as_str().unwrap().to_string();

        let response = server.get("/api/auth/me").authorization_bearer(&token).await;
        response.assert_status_ok();
        let me: serde_json::Value = response.json();
        assert_eq!(me["email"], "asha@example.com");
    }

    #[test_log::test(sqlx::test)]
    async fn test_register_duplicate_email_rejected(pool: PgPool) {
        let server = create_test_app(pool).await;
        register_user(&server, "first", "taken@example.com").await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "second",
                "email": "taken@example.com",
                "password": "super-secret"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("already exists"));
    }

    #[test_log::test(sqlx::test)]
    async fn test_register_short_password_rejected(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "shorty",
                "email": "shorty@example.com",
                "password": "abc"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("at least"));
    }

    #[test_log::test(sqlx::test)]
    async fn test_login_wrong_password(pool: PgPool) {
        let server = create_test_app(pool).await;
        register_user(&server, "mallory", "mallory@example.com").await;

        let response = server
            .post("/api/auth/login")
            .json(&json!({"email": "mallory@example.com", "password": "wrong-password"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.text().contains("Invalid email or password"));
    }

    #[test_log::test(sqlx::test)]
    async fn test_login_unknown_email(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server
            .post("/api/auth/login")
            .json(&json!({"email": "ghost@example.com", "password": "whatever-123"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[test_log::test(sqlx::test)]
    async fn test_me_requires_token(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server.get("/api/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
