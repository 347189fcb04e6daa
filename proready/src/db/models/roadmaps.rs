//! Database models for generated preparation roadmaps.

use crate::types::{RoadmapId, UserId};
use chrono::{DateTime, Utc};

/// Database request for storing a generated roadmap
#[derive(Debug, Clone)]
pub struct RoadmapCreateDBRequest {
    pub user_id: UserId,
    pub target_role: String,
    pub duration_weeks: i32,
    pub hours_per_week: i32,
    pub current_level: String,
    pub focus_areas: Vec<String>,
    pub weekly_plan: serde_json::Value,
    pub overall_strategy: String,
}

/// Database response for a roadmap
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoadmapDBResponse {
    pub id: RoadmapId,
    pub user_id: UserId,
    pub target_role: String,
    pub duration_weeks: i32,
    pub hours_per_week: i32,
    pub current_level: String,
    pub focus_areas: Vec<String>,
    pub weekly_plan: serde_json::Value,
    pub overall_strategy: String,
    pub created_at: DateTime<Utc>,
}
