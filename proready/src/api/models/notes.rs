//! API models for notes summarization.

use crate::db::models::notes::NoteDBResponse;
use crate::types::NoteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for summarizing raw notes
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

/// The structured output expected back from the model.
///
/// Aliases accept the camelCase keys the model is prompted to emit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NoteSummary {
    pub summary: String,
    #[serde(alias = "keyPoints")]
    pub key_points: Vec<String>,
    #[serde(alias = "importantConcepts")]
    pub important_concepts: Vec<String>,
}

impl Default for NoteSummary {
    fn default() -> Self {
        Self {
            summary: String::new(),
            key_points: Vec::new(),
            important_concepts: Vec::new(),
        }
    }
}

/// Public representation of a stored, summarized note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    pub id: NoteId,
    pub title: String,
    pub raw_text: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub important_concepts: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<NoteDBResponse> for NoteResponse {
    fn from(note: NoteDBResponse) -> Self {
        Self {
            id: note.id,
            title: note.title,
            raw_text: note.raw_text,
            summary: note.summary,
            key_points: note.key_points,
            important_concepts: note.important_concepts,
            created_at: note.created_at,
        }
    }
}
