//! API models for study resources.

use crate::db::models::resources::{ResourceCategory, ResourceDBResponse};
use crate::types::ResourceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for creating a custom resource
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceCreate {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: ResourceCategory,
    pub url: Option<String>,
    pub icon: Option<String>,
}

fn default_category() -> ResourceCategory {
    ResourceCategory::Other
}

/// Public representation of a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResponse {
    pub id: ResourceId,
    pub name: String,
    pub category: ResourceCategory,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ResourceDBResponse> for ResourceResponse {
    fn from(resource: ResourceDBResponse) -> Self {
        Self {
            id: resource.id,
            name: resource.name,
            category: resource.category,
            url: resource.url,
            icon: resource.icon,
            is_custom: resource.is_custom,
            created_at: resource.created_at,
        }
    }
}
