//! Database repository for generated resumes.
//!
//! The rendered PDF is stored alongside the structured payload but only
//! fetched by [`Resumes::get_pdf`], keeping list responses small.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::resumes::{ResumeCreateDBRequest, ResumeDBResponse},
};
use crate::types::{ResumeId, UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing a user's resumes
#[derive(Debug, Clone)]
pub struct ResumeFilter {
    pub user_id: UserId,
}

pub struct Resumes<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Resumes<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// The stored PDF bytes for a resume owned by the given user
    #[instrument(skip(self), fields(resume_id = %abbrev_uuid(&id)), err)]
    pub async fn get_pdf(&mut self, id: ResumeId, user_id: UserId) -> Result<Option<Vec<u8>>> {
        let pdf: Option<Vec<u8>> = sqlx::query_scalar("SELECT pdf FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(pdf)
    }

    /// Delete a resume owned by the given user; returns false when nothing matched
    #[instrument(skip(self), fields(resume_id = %abbrev_uuid(&id)), err)]
    pub async fn delete_owned(&mut self, id: ResumeId, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Resumes<'c> {
    type CreateRequest = ResumeCreateDBRequest;
    type Response = ResumeDBResponse;
    type Id = ResumeId;
    type Filter = ResumeFilter;

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let resume = sqlx::query_as::<_, ResumeDBResponse>(
            r#"
            INSERT INTO resumes (user_id, payload, pdf)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, payload, created_at
            "#,
        )
        .bind(request.user_id)
        .bind(&request.payload)
        .bind(&request.pdf)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(resume)
    }

    #[instrument(skip(self), fields(resume_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let resume = sqlx::query_as::<_, ResumeDBResponse>("SELECT id, user_id, payload, created_at FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(resume)
    }

    /// Most recent first
    #[instrument(skip(self), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let resumes = sqlx::query_as::<_, ResumeDBResponse>(
            "SELECT id, user_id, payload, created_at FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(filter.user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(resumes)
    }

    #[instrument(skip(self), fields(resume_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
