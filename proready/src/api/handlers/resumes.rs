//! Resume generation, stored PDFs, and retrieval.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    AppState,
    ai::{extract::parse_model_json, fallback, prompts},
    api::models::{
        resumes::{ResumePayload, ResumeResponse},
        users::CurrentUser,
    },
    db::{
        handlers::{Repository, Resumes, resumes::ResumeFilter},
        models::resumes::ResumeCreateDBRequest,
    },
    errors::{Error, Result},
    pdf,
    types::ResumeId,
};

/// Polish the submitted details with the model, or fall back to them as-is.
///
/// Resume generation always produces a document; model trouble only costs
/// the polished summary.
async fn polished_resume(state: &AppState, details: &ResumePayload) -> ResumePayload {
    let prompt = prompts::resume_prompt(details);

    let raw = match state.ai.generate(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("resume generation unavailable, using submitted details: {e}");
            return fallback::resume_from_details(details);
        }
    };

    match parse_model_json::<ResumePayload>(&raw) {
        Ok(resume) => resume,
        Err(e) => {
            warn!("model returned an unusable resume, using submitted details: {e:#}");
            fallback::resume_from_details(details)
        }
    }
}

/// Generate a resume from the submitted details and store it with its PDF
#[tracing::instrument(skip_all)]
pub async fn generate_resume(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(details): Json<ResumePayload>,
) -> Result<(StatusCode, Json<ResumeResponse>)> {
    if details.personal_info.name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "personal_info.name is required".to_string(),
        });
    }

    let resume = polished_resume(&state, &details).await;
    let pdf_bytes = pdf::render_resume(&resume)?;

    let payload = serde_json::to_value(&resume).map_err(|e| Error::Internal {
        operation: format!("encode resume payload: {e}"),
    })?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Resumes::new(&mut pool_conn);

    let stored = repo
        .create(&ResumeCreateDBRequest {
            user_id: current_user.id,
            payload,
            pdf: pdf_bytes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ResumeResponse::try_from(stored)?)))
}

/// The caller's stored resumes, most recent first (PDFs excluded)
#[tracing::instrument(skip_all)]
pub async fn list_resumes(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<ResumeResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Resumes::new(&mut pool_conn);

    let resumes = repo.list(&ResumeFilter { user_id: current_user.id }).await?;

    let responses = resumes.into_iter().map(ResumeResponse::try_from).collect::<Result<Vec<_>>>()?;

    Ok(Json(responses))
}

/// Download the rendered PDF for one of the caller's resumes
#[tracing::instrument(skip_all)]
pub async fn get_resume_pdf(State(state): State<AppState>, current_user: CurrentUser, Path(resume_id): Path<ResumeId>) -> Result<Response> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Resumes::new(&mut pool_conn);

    let pdf_bytes = repo.get_pdf(resume_id, current_user.id).await?.ok_or_else(|| Error::NotFound {
        resource: "Resume".to_string(),
        id: resume_id.to_string(),
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"resume.pdf\""),
        ],
        pdf_bytes,
    )
        .into_response())
}

/// Delete one of the caller's resumes
#[tracing::instrument(skip_all)]
pub async fn delete_resume(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(resume_id): Path<ResumeId>,
) -> Result<StatusCode> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Resumes::new(&mut pool_conn);

    let deleted = repo.delete_owned(resume_id, current_user.id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Resume".to_string(),
            id: resume_id.to_string(),
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

    fn details() -> serde_json::Value {
        json!({
            "personalInfo": {"name": "Asha Rao", "email": "asha@example.com", "phone": "999"},
            "skills": {"technical": ["Rust", "SQL"]},
            "education": [{"degree": "B.Tech", "institution": "NITT", "year": "2026"}]
        })
    }

    #[test_log::test(sqlx::test)]
    async fn test_generate_uses_model_output(pool: PgPool) {
        let mock = MockServer::start().await;
        let polished = json!({
            "personalInfo": {"name": "Asha Rao", "email": "asha@example.com", "phone": "999"},
            "summary": "Backend-focused engineering student.",
            "skills": {"technical": ["Rust", "SQL"]}
        });
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&polished.to_string())))
            .mount(&mock)
            .await;

        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "writer", "writer@example.com").await;

        let response = server
            .post("/api/ai/resume/generate")
            .authorization_bearer(&token)
            .json(&details())
            .await;
        response.assert_status(StatusCode::CREATED);

        let resume: serde_json::Value = response.json();
        assert_eq!(resume["payload"]["summary"], "Backend-focused engineering student.");
        let id = resume["id"].as_str().unwrap();
        assert_eq!(resume["pdf_url"], format!("/api/ai/resume/{id}/pdf"));
    }

    #[test_log::test(sqlx::test)]
    async fn test_generate_falls_back_to_submitted_details(pool: PgPool) {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock)
            .await;

        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "offline", "offline@example.com").await;

        let response = server
            .post("/api/ai/resume/generate")
            .authorization_bearer(&token)
            .json(&details())
            .await;
        response.assert_status(StatusCode::CREATED);

        let resume: serde_json::Value = response.json();
        // Fallback keeps the submitted details and fills in a templated summary
        assert_eq!(resume["payload"]["personal_info"]["name"], "Asha Rao");
        assert!(!resume["payload"]["summary"].as_str().unwrap().is_empty());
    }

    #[test_log::test(sqlx::test)]
    async fn test_generate_requires_name(pool: PgPool) {
        let mock = MockServer::start().await;
        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "anon", "anon@example.com").await;

        let response = server
            .post("/api/ai/resume/generate")
            .authorization_bearer(&token)
            .json(&json!({"skills": {"technical": ["Rust"]}}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[test_log::test(sqlx::test)]
    async fn test_pdf_download(pool: PgPool) {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock)
            .await;

        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "downloader", "downloader@example.com").await;

        let resume: serde_json::Value = server
            .post("/api/ai/resume/generate")
            .authorization_bearer(&token)
            .json(&details())
            .await
            .json();
        let id = resume["id"].as_str().unwrap();

        let response = server
            .get(&format!("/api/ai/resume/{id}/pdf"))
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/pdf");
        assert!(response.as_bytes().starts_with(b"%PDF"));
    }

    #[test_log::test(sqlx::test)]
    async fn test_list_and_delete_resumes(pool: PgPool) {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock)
            .await;

        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let token = register_user(&server, "collector", "collector@example.com").await;

        let resume: serde_json::Value = server
            .post("/api/ai/resume/generate")
            .authorization_bearer(&token)
            .json(&details())
            .await
            .json();
        let id = resume["id"].as_str().unwrap();

        let resumes: Vec<serde_json::Value> = server.get("/api/ai/resume").authorization_bearer(&token).await.json();
        assert_eq!(resumes.len(), 1);

        server
            .delete(&format!("/api/ai/resume/{id}"))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        // The PDF disappears with the resume
        server
            .get(&format!("/api/ai/resume/{id}/pdf"))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[test_log::test(sqlx::test)]
    async fn test_resumes_are_scoped_to_user(pool: PgPool) {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/.*:generateContent$"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock)
            .await;

        let server = create_test_app_with_ai(pool, &mock.uri()).await;
        let owner = register_user(&server, "resumeowner", "resumeowner@example.com").await;
        let other = register_user(&server, "resumeother", "resumeother@example.com").await;

        let resume: serde_json::Value = server
            .post("/api/ai/resume/generate")
            .authorization_bearer(&owner)
            .json(&details())
            .await
            .json();
        let id = resume["id"].as_str().unwrap();

        server
            .get(&format!("/api/ai/resume/{id}/pdf"))
            .authorization_bearer(&other)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let resumes: Vec<serde_json::Value> = server.get("/api/ai/resume").authorization_bearer(&other).await.json();
        assert!(resumes.is_empty());
    }
}
