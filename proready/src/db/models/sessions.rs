//! Database models for study sessions.

use crate::types::{ResourceId, SessionId, UserId};
use chrono::{DateTime, NaiveDate, Utc};

/// Database request for starting a session
#[derive(Debug, Clone)]
pub struct SessionCreateDBRequest {
    pub user_id: UserId,
    pub resource_id: ResourceId,
}

/// Database request for closing a session
#[derive(Debug, Clone)]
pub struct SessionEndDBRequest {
    pub problems_solved: i32,
    pub topics_studied: Vec<String>,
    pub notes: Option<String>,
}

/// Database response for a session, with the resource denormalized for display
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionDBResponse {
    pub id: SessionId,
    pub user_id: UserId,
    pub resource_id: ResourceId,
    pub resource_name: String,
    pub resource_icon: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_minutes: i32,
    pub problems_solved: i32,
    pub topics_studied: Vec<String>,
    pub notes: String,
    pub is_active: bool,
    pub session_date: NaiveDate,
}

/// Slim row used by the analytics aggregation over completed sessions
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompletedSessionRow {
    pub resource_name: String,
    pub session_date: NaiveDate,
    pub duration_minutes: i32,
    pub problems_solved: i32,
}
