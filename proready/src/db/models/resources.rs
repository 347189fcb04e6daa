//! Database models for study resources.

use crate::types::{ResourceId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category a study resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Dsa,
    Development,
    WebDev,
    SystemDesign,
    Other,
}

/// Database request for creating a resource
#[derive(Debug, Clone)]
pub struct ResourceCreateDBRequest {
    pub name: String,
    pub category: ResourceCategory,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub is_custom: bool,
    /// Owner for custom resources; None for platform defaults
    pub user_id: Option<UserId>,
}

/// Database response for a resource
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResourceDBResponse {
    pub id: ResourceId,
    pub name: String,
    pub category: ResourceCategory,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub is_custom: bool,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}
