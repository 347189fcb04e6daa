//! API models for streaks.

use crate::db::models::streaks::{ResourceStreakDBResponse, StreakDBResponse};
use crate::types::ResourceId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A per-resource streak entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceStreakResponse {
    pub resource_id: ResourceId,
    pub resource_name: String,
    pub resource_icon: Option<String>,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_active_date: Option<NaiveDate>,
}

impl From<ResourceStreakDBResponse> for ResourceStreakResponse {
    fn from(row: ResourceStreakDBResponse) -> Self {
        Self {
            resource_id: row.resource_id,
            resource_name: row.resource_name,
            resource_icon: row.resource_icon,
            current_streak: row.current_streak,
            longest_streak: row.longest_streak,
            last_active_date: row.last_active_date,
        }
    }
}

/// The user's overall streak with the per-resource breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakResponse {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub total_session_days: i32,
    pub last_active_date: Option<NaiveDate>,
    pub resources: Vec<ResourceStreakResponse>,
}

impl StreakResponse {
    pub fn from_rows(overall: StreakDBResponse, resources: Vec<ResourceStreakDBResponse>) -> Self {
        Self {
            current_streak: overall.current_streak,
            longest_streak: overall.longest_streak,
            total_session_days: overall.total_session_days,
            last_active_date: overall.last_active_date,
            resources: resources.into_iter().map(ResourceStreakResponse::from).collect(),
        }
    }
}
