//! Database repository for generated preparation roadmaps.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::roadmaps::{RoadmapCreateDBRequest, RoadmapDBResponse},
};
use crate::types::{RoadmapId, UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing a user's roadmaps
#[derive(Debug, Clone)]
pub struct RoadmapFilter {
    pub user_id: UserId,
}

pub struct Roadmaps<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Roadmaps<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Delete a roadmap owned by the given user; returns false when nothing matched
    #[instrument(skip(self), fields(roadmap_id = %abbrev_uuid(&id)), err)]
    pub async fn delete_owned(&mut self, id: RoadmapId, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM roadmaps WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Roadmaps<'c> {
    type CreateRequest = RoadmapCreateDBRequest;
    type Response = RoadmapDBResponse;
    type Id = RoadmapId;
    type Filter = RoadmapFilter;

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let roadmap = sqlx::query_as::<_, RoadmapDBResponse>(
            r#"
            INSERT INTO roadmaps (user_id, target_role, duration_weeks, hours_per_week, current_level, focus_areas, weekly_plan, overall_strategy)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.target_role)
        .bind(request.duration_weeks)
        .bind(request.hours_per_week)
        .bind(&request.current_level)
        .bind(&request.focus_areas)
        .bind(&request.weekly_plan)
        .bind(&request.overall_strategy)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(roadmap)
    }

    #[instrument(skip(self), fields(roadmap_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let roadmap = sqlx::query_as::<_, RoadmapDBResponse>("SELECT * FROM roadmaps WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(roadmap)
    }

    /// Most recent first
    #[instrument(skip(self), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let roadmaps = sqlx::query_as::<_, RoadmapDBResponse>("SELECT * FROM roadmaps WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(filter.user_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(roadmaps)
    }

    #[instrument(skip(self), fields(roadmap_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM roadmaps WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
