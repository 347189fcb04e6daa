//! Database repository for summarized notes.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::notes::{NoteCreateDBRequest, NoteDBResponse},
};
use crate::types::{NoteId, UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing a user's notes
#[derive(Debug, Clone)]
pub struct NoteFilter {
    pub user_id: UserId,
}

pub struct Notes<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Notes<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Delete a note owned by the given user; returns false when nothing matched
    #[instrument(skip(self), fields(note_id = %abbrev_uuid(&id)), err)]
    pub async fn delete_owned(&mut self, id: NoteId, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Notes<'c> {
    type CreateRequest = NoteCreateDBRequest;
    type Response = NoteDBResponse;
    type Id = NoteId;
    type Filter = NoteFilter;

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let note = sqlx::query_as::<_, NoteDBResponse>(
            r#"
            INSERT INTO notes (user_id, title, raw_text, summary, key_points, important_concepts)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.title)
        .bind(&request.raw_text)
        .bind(&request.summary)
        .bind(&request.key_points)
        .bind(&request.important_concepts)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(note)
    }

    #[instrument(skip(self), fields(note_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let note = sqlx::query_as::<_, NoteDBResponse>("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(note)
    }

    /// Most recent first
    #[instrument(skip(self), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let notes = sqlx::query_as::<_, NoteDBResponse>("SELECT * FROM notes WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(filter.user_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(notes)
    }

    #[instrument(skip(self), fields(note_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
