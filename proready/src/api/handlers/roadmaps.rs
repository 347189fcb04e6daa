//! Preparation roadmap generation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    ai::{extract::parse_model_json, prompts},
    api::models::{
        roadmaps::{GeneratedRoadmap, RoadmapGenerateRequest, RoadmapResponse},
        users::CurrentUser,
    },
    db::{
        handlers::{Repository, Roadmaps, roadmaps::RoadmapFilter},
        models::roadmaps::RoadmapCreateDBRequest,
    },
    errors::{Error, Result},
    types::RoadmapId,
};

/// Generate a week-by-week roadmap and store it.
///
/// Unlike resumes there is no deterministic fallback worth serving here, so
/// backend failures and unparseable output both surface as 502.
#[tracing::instrument(skip_all)]
pub async fn generate_roadmap(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<RoadmapGenerateRequest>,
) -> Result<(StatusCode, Json<RoadmapResponse>)> {
    let target_role = request.target_role.trim().to_string();
    if target_role.is_empty() {
        return Err(Error::BadRequest {
            message: "target_role cannot be empty".to_string(),
        });
    }
    if !(1..=104).contains(&request.duration_weeks) {
        return Err(Error::BadRequest {
            message: "duration_weeks must be between 1 and 104".to_string(),
        });
    }
    if !(1..=100).contains(&request.hours_per_week) {
        return Err(Error::BadRequest {
            message: "hours_per_week must be between 1 and 100".to_string(),
        });
    }

    let prompt = prompts::roadmap_prompt(&request);
    let raw = state.ai.generate(&prompt).await?;

    let roadmap: GeneratedRoadmap = parse_model_json(&raw).map_err(|e| Error::Upstream {
        message: format!("model returned an unusable roadmap: {e:#}"),
    })?;
    if roadmap.weekly_plan.is_empty() {
        return Err(Error::Upstream {
            message: "model returned an empty weekly plan".to_string(),
        });
    }

    let weekly_plan = serde_json::to_value(&roadmap.weekly_plan).map_err(|e| Error::Internal {
        operation: format!("encode weekly plan: {e}"),
    })?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Roadmaps::new(&mut pool_conn);

    let stored = repo
        .create(&RoadmapCreateDBRequest {
            user_id: current_user.id,
            target_role,
            duration_weeks: request.duration_weeks,
            hours_per_week: request.hours_per_week,
            current_level: request.current_level,
            focus_areas: request.focus_areas,
            weekly_plan,
            overall_strategy: roadmap.overall_strategy,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RoadmapResponse::try_from(stored)?)))
}

/// The caller's stored roadmaps, most recent first
#[tracing::instrument(skip_all)]
pub async fn list_roadmaps(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<RoadmapResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Roadmaps::new(&mut pool_conn);

    let roadmaps = repo.list(&RoadmapFilter { user_id: current_user.id }).await?;

    let responses = roadmaps.into_iter().map(RoadmapResponse::try_from).collect::<Result<Vec<_>>>()?;

    Ok(Json(responses))
}

/// Delete one of the caller's roadmaps
#[tracing::instrument(skip_all)]
pub async fn delete_roadmap(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(roadmap_id): Path<RoadmapId>,
) -> Result<StatusCode> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Roadmaps::new(&mut pool_conn);

    let deleted = repo.delete_owned(roadmap_id, current_user.id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Roadmap".to_string(),
            id: roadmap_id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app_with_ai, register_user};
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn candidate_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [
                {"content": {"parts": [{"text": text}]}}
            ]
        })
    }

    fn plan_json() -> String {
        json!({
            "weeklyPlan": [
                {
                    "week": 1,
                    "title": "Foundations",
                    "focus": ["Arrays"],
                    "topics": ["Two pointers", "Sliding window"],
                    "resources": ["LeetCode"],
                    "estimatedHours": 10
                },
                {
                    "week": 2,
                    "title": "Linked structures",
                    "focus": ["Linked lists"],
                    "topics": ["Reversal"],
                    "resources": ["GeeksforGeeks"],
                    "estimatedHours": 10
                }
            ],
            "overallStrategy": "Drill arrays first, then linked structures."
        })
        .to_string()
    }

    #[test_log::test(sqlx::test)]
    async fn test_generate_roadmap(pool: PgPool) {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&plan_json())))
            .mount(&mock)
            .await;

        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "planner", "planner@example.com").await;

        let response = server
            .post("/api/ai/roadmap/generate")
            .authorization_bearer(&token)
            .json(&json!({
                "target_role": "Backend Engineer",
                "duration_weeks": 2,
                "hours_per_week": 10,
                "focus_areas": ["dsa"]
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let roadmap: serde_json::Value = response.json();
        assert_eq!(roadmap["target_role"], "Backend Engineer");
        assert_eq!(roadmap["weekly_plan"].as_array().unwrap().len(), 2);
        assert_eq!(roadmap["weekly_plan"][0]["title"], "Foundations");
        assert_eq!(roadmap["weekly_plan"][0]["estimated_hours"], 10);
        assert_eq!(roadmap["overall_strategy"], "Drill arrays first, then linked structures.");
    }

    #[test_log::test(sqlx::test)]
    async fn test_generate_propagates_backend_failure(pool: PgPool) {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock)
            .await;

        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "throttled", "throttled@example.com").await;

        let response = server
            .post("/api/ai/roadmap/generate")
            .authorization_bearer(&token)
            .json(&json!({"target_role": "SDE"}))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[test_log::test(sqlx::test)]
    async fn test_generate_rejects_unusable_output(pool: PgPool) {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("Sorry, I can't produce a plan.")))
            .mount(&mock)
            .await;

        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "unlucky", "unlucky@example.com").await;

        let response = server
            .post("/api/ai/roadmap/generate")
            .authorization_bearer(&token)
            .json(&json!({"target_role": "SDE"}))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);

        // Nothing was stored
        let roadmaps: Vec<serde_json::Value> = server.get("/api/ai/roadmap").authorization_bearer(&token).await.json();
        assert!(roadmaps.is_empty());
    }

    #[test_log::test(sqlx::test)]
    async fn test_generate_validates_input(pool: PgPool) {
        let mock = MockServer::start().await;
        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "sloppy", "sloppy@example.com").await;

        let response = server
            .post("/api/ai/roadmap/generate")
            .authorization_bearer(&token)
            .json(&json!({"target_role": "  "}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/ai/roadmap/generate")
            .authorization_bearer(&token)
            .json(&json!({"target_role": "SDE", "duration_weeks": 0}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[test_log::test(sqlx::test)]
    async fn test_list_and_delete_roadmaps(pool: PgPool) {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&plan_json())))
            .mount(&mock)
            .await;

        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "archiver", "archiver@example.com").await;

        let roadmap: serde_json::Value = server
            .post("/api/ai/roadmap/generate")
            .authorization_bearer(&token)
            .json(&json!({"target_role": "SDE", "duration_weeks": 2}))
            .await
            .json();
        let id = roadmap["id"].as_str().unwrap();

        let roadmaps: Vec<serde_json::Value> = server.get("/api/ai/roadmap").authorization_bearer(&token).await.json();
        assert_eq!(roadmaps.len(), 1);

        server
            .delete(&format!("/api/ai/roadmap/{id}"))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let roadmaps: Vec<serde_json::Value> = server.get("/api/ai/roadmap").authorization_bearer(&token).await.json();
        assert!(roadmaps.is_empty());
    }
}
