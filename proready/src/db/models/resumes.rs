//! Database models for generated resumes.

use crate::types::{ResumeId, UserId};
use chrono::{DateTime, Utc};

/// Database request for storing a generated resume and its rendered PDF
#[derive(Debug, Clone)]
pub struct ResumeCreateDBRequest {
    pub user_id: UserId,
    pub payload: serde_json::Value,
    pub pdf: Vec<u8>,
}

/// Database response for a resume (PDF bytes fetched separately)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResumeDBResponse {
    pub id: ResumeId,
    pub user_id: UserId,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
