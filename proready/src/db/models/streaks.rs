//! Database models for streak tracking.

use crate::types::{ResourceId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Database response for a user's overall streak
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StreakDBResponse {
    pub id: Uuid,
    pub user_id: UserId,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub total_session_days: i32,
    pub last_active_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

/// Database response for a per-resource streak, joined with the resource
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResourceStreakDBResponse {
    pub resource_id: ResourceId,
    pub resource_name: String,
    pub resource_icon: Option<String>,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_active_date: Option<NaiveDate>,
}
