//! Notes summarization backed by the generative model.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::warn;

use crate::{
    AppState,
    ai::{extract::parse_model_json, prompts},
    api::models::{
        notes::{NoteResponse, NoteSummary, SummarizeRequest},
        users::CurrentUser,
    },
    db::{
        handlers::{Notes, Repository, notes::NoteFilter},
        models::notes::NoteCreateDBRequest,
    },
    errors::{Error, Result},
    types::NoteId,
};

/// Ask the model for a structured summary, falling back to the raw text.
///
/// Summarization never fails on backend trouble: the note is stored either
/// way so the user does not lose their input.
async fn summarize_text(state: &AppState, text: &str) -> NoteSummary {
    let prompt = prompts::notes_prompt(text);

    let raw = match state.ai.generate(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("notes summarization unavailable, storing raw text: {e}");
            return NoteSummary {
                summary: text.to_string(),
                ..Default::default()
            };
        }
    };

    match parse_model_json::<NoteSummary>(&raw) {
        Ok(summary) if !summary.summary.trim().is_empty() => summary,
        Ok(_) | Err(_) => {
            warn!("model returned an unusable summary, storing raw text");
            NoteSummary {
                summary: text.to_string(),
                ..Default::default()
            }
        }
    }
}

/// Summarize raw notes and store the result
#[tracing::instrument(skip_all)]
pub async fn summarize_notes(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<SummarizeRequest>,
) -> Result<(StatusCode, Json<NoteResponse>)> {
    let text = request.content.trim().to_string();
    if text.is_empty() {
        return Err(Error::BadRequest {
            message: "Notes content cannot be empty".to_string(),
        });
    }

    let summary = summarize_text(&state, &text).await;

    let title = request
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled notes".to_string());

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Notes::new(&mut pool_conn);

    let note = repo
        .create(&NoteCreateDBRequest {
            user_id: current_user.id,
            title,
            raw_text: text,
            summary: summary.summary,
            key_points: summary.key_points,
            important_concepts: summary.important_concepts,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}

/// The caller's stored notes, most recent first
#[tracing::instrument(skip_all)]
pub async fn list_notes(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<NoteResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Notes::new(&mut pool_conn);

    let notes = repo.list(&NoteFilter { user_id: current_user.id }).await?;

    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Delete one of the caller's notes
#[tracing::instrument(skip_all)]
pub async fn delete_note(State(state): State<AppState>, current_user: CurrentUser, Path(note_id): Path<NoteId>) -> Result<StatusCode> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Notes::new(&mut pool_conn);

    let deleted = repo.delete_owned(note_id, current_user.id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Note".to_string(),
            id: note_id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
