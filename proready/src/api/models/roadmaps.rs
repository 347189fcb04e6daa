//! API models for preparation roadmaps.

use crate::db::models::roadmaps::RoadmapDBResponse;
use crate::errors::Error;
use crate::types::RoadmapId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for generating a roadmap.
///
/// Aliases accept the camelCase keys older clients send.
#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapGenerateRequest {
    #[serde(alias = "targetRole")]
    pub target_role: String,
    #[serde(default = "default_duration_weeks", alias = "duration", alias = "durationWeeks")]
    pub duration_weeks: i32,
    #[serde(default = "default_hours_per_week", alias = "hoursPerWeek")]
    pub hours_per_week: i32,
    #[serde(default = "default_level", alias = "currentLevel")]
    pub current_level: String,
    #[serde(default, alias = "focusAreas")]
    pub focus_areas: Vec<String>,
}

fn default_duration_weeks() -> i32 {
    12
}

fn default_hours_per_week() -> i32 {
    10
}

fn default_level() -> String {
    "beginner".to_string()
}

/// One week of the generated plan.
///
/// Aliases accept the camelCase keys the model is prompted to emit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekPlan {
    pub week: i32,
    pub title: String,
    pub focus: Vec<String>,
    pub topics: Vec<String>,
    pub resources: Vec<String>,
    #[serde(alias = "estimatedHours")]
    pub estimated_hours: Option<i32>,
}

/// The structured output expected back from the model
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedRoadmap {
    #[serde(alias = "weeklyPlan")]
    pub weekly_plan: Vec<WeekPlan>,
    #[serde(default, alias = "overallStrategy")]
    pub overall_strategy: String,
}

/// Public representation of a stored roadmap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapResponse {
    pub id: RoadmapId,
    pub target_role: String,
    pub duration_weeks: i32,
    pub hours_per_week: i32,
    pub current_level: String,
    pub focus_areas: Vec<String>,
    pub weekly_plan: Vec<WeekPlan>,
    pub overall_strategy: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RoadmapDBResponse> for RoadmapResponse {
    type Error = Error;

    fn try_from(roadmap: RoadmapDBResponse) -> Result<Self, Error> {
        let weekly_plan = serde_json::from_value(roadmap.weekly_plan).map_err(|e| Error::Internal {
            operation: format!("decode stored weekly plan: {e}"),
        })?;

        Ok(Self {
            id: roadmap.id,
            target_role: roadmap.target_role,
            duration_weeks: roadmap.duration_weeks,
            hours_per_week: roadmap.hours_per_week,
            current_level: roadmap.current_level,
            focus_areas: roadmap.focus_areas,
            weekly_plan,
            overall_strategy: roadmap.overall_strategy,
            created_at: roadmap.created_at,
        })
    }
}
