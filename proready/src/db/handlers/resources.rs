//! Database repository for study resources.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::resources::{ResourceCreateDBRequest, ResourceDBResponse},
};
use crate::types::{ResourceId, UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing resources visible to a user
#[derive(Debug, Clone)]
pub struct ResourceFilter {
    /// Defaults plus this user's custom resources
    pub user_id: UserId,
}

pub struct Resources<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Resources<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Delete a custom resource owned by the given user.
    ///
    /// Platform defaults and other users' customs are left untouched; returns
    /// false when nothing matched.
    #[instrument(skip(self), fields(resource_id = %abbrev_uuid(&id)), err)]
    pub async fn delete_custom(&mut self, id: ResourceId, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1 AND user_id = $2 AND is_custom")
            .bind(id)
            .bind(user_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Resources<'c> {
    type CreateRequest = ResourceCreateDBRequest;
    type Response = ResourceDBResponse;
    type Id = ResourceId;
    type Filter = ResourceFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let resource = sqlx::query_as::<_, ResourceDBResponse>(
            r#"
            INSERT INTO resources (name, category, url, icon, is_custom, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(request.category)
        .bind(&request.url)
        .bind(&request.icon)
        .bind(request.is_custom)
        .bind(request.user_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(resource)
    }

    #[instrument(skip(self), fields(resource_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let resource = sqlx::query_as::<_, ResourceDBResponse>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(resource)
    }

    /// Defaults first, then the user's own custom resources, each alphabetical
    #[instrument(skip(self), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let resources = sqlx::query_as::<_, ResourceDBResponse>(
            r#"
            SELECT * FROM resources
            WHERE NOT is_custom OR user_id = $1
            ORDER BY is_custom, name
            "#,
        )
        .bind(filter.user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(resources)
    }

    #[instrument(skip(self), fields(resource_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
