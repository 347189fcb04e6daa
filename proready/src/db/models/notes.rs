//! Database models for summarized notes.

use crate::types::{NoteId, UserId};
use chrono::{DateTime, Utc};

/// Database request for storing a summarized note
#[derive(Debug, Clone)]
pub struct NoteCreateDBRequest {
    pub user_id: UserId,
    pub title: String,
    pub raw_text: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub important_concepts: Vec<String>,
}

/// Database response for a summarized note
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteDBResponse {
    pub id: NoteId,
    pub user_id: UserId,
    pub title: String,
    pub raw_text: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub important_concepts: Vec<String>,
    pub created_at: DateTime<Utc>,
}
