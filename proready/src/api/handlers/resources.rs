//! Study resource listing and custom resource management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        resources::{ResourceCreate, ResourceResponse},
        users::CurrentUser,
    },
    db::{
        handlers::{Repository, Resources, resources::ResourceFilter},
        models::resources::ResourceCreateDBRequest,
    },
    errors::{Error, Result},
    types::ResourceId,
};

/// List platform defaults plus the caller's own custom resources
#[tracing::instrument(skip_all)]
pub async fn list_resources(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<ResourceResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Resources::new(&mut pool_conn);

    let resources = repo.list(&ResourceFilter { user_id: current_user.id }).await?;

    Ok(Json(resources.into_iter().map(ResourceResponse::from).collect()))
}

/// Create a custom resource owned by the caller
#[tracing::instrument(skip_all)]
pub async fn create_resource(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(data): Json<ResourceCreate>,
) -> Result<(StatusCode, Json<ResourceResponse>)> {
    let name = data.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::BadRequest {
            message: "Resource name cannot be empty".to_string(),
        });
    }

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Resources::new(&mut pool_conn);

    let resource = repo
        .create(&ResourceCreateDBRequest {
            name,
            category: data.category,
            url: data.url,
            icon: data.icon,
            is_custom: true,
            user_id: Some(current_user.id),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ResourceResponse::from(resource))))
}

/// Delete one of the caller's custom resources.
///
/// Platform defaults and other users' resources are indistinguishable from
/// missing rows here, so both come back as 404.
#[tracing::instrument(skip_all)]
pub async fn delete_resource(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(resource_id): Path<ResourceId>,
) -> Result<StatusCode> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Resources::new(&mut pool_conn);

    let deleted = repo.delete_custom(resource_id, current_user.id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Resource".to_string(),
            id: resource_id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, register_user};
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;

    #[test_log::test(sqlx::test)]
    async fn test_list_includes_seeded_defaults(pool: PgPool) {
        let server = create_test_app(pool).await;
        let token = register_user(&server, "lister", "lister@example.com").await;

        let response = server.get("/api/resources").authorization_bearer(&token).await;
        response.assert_status_ok();

        let resources: Vec<serde_json::Value> = response.json();
        assert!(resources.len() >= 8);
        assert!(resources.iter().any(|r| r["name"] == "LeetCode"));
        assert!(resources.iter().all(|r| r["is_custom"] == false));
    }

    #[test_log::test(sqlx::test)]
    async fn test_create_and_list_custom_resource(pool: PgPool) {
        let server = create_test_app(pool).await;
        let token = register_user(&server, "maker", "maker@example.com").await;

        let response = server
            .post("/api/resources")
            .authorization_bearer(&token)
            .json(&json!({"name": "Striver Sheet", "category": "dsa", "url": "https://takeuforward.org"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: serde_json::Value = response.json();
        assert_eq!(created["is_custom"], true);
        assert_eq!(created["category"], "dsa");

        let response = server.get("/api/resources").authorization_bearer(&token).await;
        let resources: Vec<serde_json::Value> = response.json();
        assert!(resources.iter().any(|r| r["name"] == "Striver Sheet"));
    }

    #[test_log::test(sqlx::test)]
    async fn test_custom_resources_are_private(pool: PgPool) {
        let server = create_test_app(pool).await;
        let owner = register_user(&server, "owner", "owner@example.com").await;
        let other = register_user(&server, "other", "other@example.com").await;

        server
            .post("/api/resources")
            .authorization_bearer(&owner)
            .json(&json!({"name": "My Private List"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/api/resources").authorization_bearer(&other).await;
        let resources: Vec<serde_json::Value> = response.json();
        assert!(!resources.iter().any(|r| r["name"] == "My Private List"));
    }

    #[test_log::test(sqlx::test)]
    async fn test_duplicate_custom_name_conflicts(pool: PgPool) {
        let server = create_test_app(pool).await;
        let token = register_user(&server, "dupe", "dupe@example.com").await;

        server
            .post("/api/resources")
            .authorization_bearer(&token)
            .json(&json!({"name": "Same Name"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/resources")
            .authorization_bearer(&token)
            .json(&json!({"name": "Same Name"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert!(response.text().contains("already exists"));
    }

    #[test_log::test(sqlx::test)]
    async fn test_delete_own_custom_resource(pool: PgPool) {
        let server = create_test_app(pool).await;
        let token = register_user(&server, "deleter", "deleter@example.com").await;

        let created: serde_json::Value = server
            .post("/api/resources")
            .authorization_bearer(&token)
            .json(&json!({"name": "Scratch Pad"}))
            .await
            .json();
        let id = created["id"].as_str().unwrap();

        let response = server
            .delete(&format!("/api/resources/{id}"))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let resources: Vec<serde_json::Value> = server.get("/api/resources").authorization_bearer(&token).await.json();
        assert!(!resources.iter().any(|r| r["name"] == "Scratch Pad"));
    }

    #[test_log::test(sqlx::test)]
    async fn test_cannot_delete_default_resource(pool: PgPool) {
        let server = create_test_app(pool).await;
        let token = register_user(&server, "vandal", "vandal@example.com").await;

        let resources: Vec<serde_json::Value> = server.get("/api/resources").authorization_bearer(&token).await.json();
        let default_id = resources
            .iter()
            .find(|r| r["is_custom"] == false)
            .and_then(|r| r["id"].as_str())
            .unwrap()
            .to_string();

        let response = server
            .delete(&format!("/api/resources/{default_id}"))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[test_log::test(sqlx::test)]
    async fn test_cannot_delete_another_users_resource(pool: PgPool) {
        let server = create_test_app(pool).await;
        let owner = register_user(&server, "owner2", "owner2@example.com").await;
        let thief = register_user(&server, "thief", "thief@example.com").await;

        let created: serde_json::Value = server
            .post("/api/resources")
            .authorization_bearer(&owner)
            .json(&json!({"name": "Owned Elsewhere"}))
            .await
            .json();
        let id = created["id"].as_str().unwrap();

        let response = server
            .delete(&format!("/api/resources/{id}"))
            .authorization_bearer(&thief)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
