//! API models for study sessions and analytics queries.

use crate::db::models::sessions::SessionDBResponse;
use crate::tracking::analytics::Period;
use crate::types::{ResourceId, SessionId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Request body for starting a session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStartRequest {
    pub resource_id: ResourceId,
}

/// Request body for ending a session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionEndRequest {
    #[serde(alias = "sessionId")]
    pub session_id: SessionId,
    #[serde(default, alias = "activityDetails")]
    pub activity_details: ActivityDetails,
}

/// What the user accomplished during the session.
///
/// Aliases accept the camelCase keys older clients send.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActivityDetails {
    #[serde(alias = "problemsSolved")]
    pub problems_solved: i32,
    #[serde(alias = "topicsStudied")]
    pub topics_studied: Vec<String>,
    pub notes: Option<String>,
}

/// Public representation of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: SessionId,
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

impl From<SessionDBResponse> for SessionResponse {
    fn from(session: SessionDBResponse) -> Self {
        Self {
            id: session.id,
            resource_id: session.resource_id,
            resource_name: session.resource_name,
            resource_icon: session.resource_icon,
            started_at: session.started_at,
            ended_at: session.ended_at,
            duration_minutes: session.duration_minutes,
            problems_solved: session.problems_solved,
            topics_studied: session.topics_studied,
            notes: session.notes,
            is_active: session.is_active,
            session_date: session.session_date,
        }
    }
}

/// Query parameters for listing session history
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionListQuery {
    pub period: Option<Period>,
    pub resource_id: Option<ResourceId>,
    pub limit: Option<i64>,
}

/// Query parameters for the analytics endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsQuery {
    pub period: Period,
}
