//! Database repository for study sessions.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::sessions::{CompletedSessionRow, SessionCreateDBRequest, SessionDBResponse, SessionEndDBRequest},
};
use crate::types::{ResourceId, SessionId, UserId, abbrev_uuid};
use chrono::NaiveDate;
use sqlx::{PgConnection, QueryBuilder};
use tracing::instrument;

/// Filter for listing a user's session history
#[derive(Debug, Clone)]
pub struct SessionFilter {
    pub user_id: UserId,
    /// Only sessions on or after this date
    pub since: Option<NaiveDate>,
    /// Only sessions against this resource
    pub resource_id: Option<ResourceId>,
    pub limit: i64,
}

impl SessionFilter {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            since: None,
            resource_id: None,
            limit: 50,
        }
    }
}

pub struct Sessions<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Sessions<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// The user's currently open session, if any
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn find_active(&mut self, user_id: UserId) -> Result<Option<SessionDBResponse>> {
        let session = sqlx::query_as::<_, SessionDBResponse>(
            r#"
            SELECT s.*, r.name AS resource_name, r.icon AS resource_icon
            FROM sessions s
            JOIN resources r ON r.id = s.resource_id
            WHERE s.user_id = $1 AND s.is_active
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(session)
    }

    /// Close a session by id, computing the elapsed whole minutes.
    ///
    /// Returns None when no *active* session with that id belongs to the
    /// user, so callers cannot close someone else's session or close one
    /// twice.
    #[instrument(skip(self, request), fields(session_id = %abbrev_uuid(&id), user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn end_session(
        &mut self,
        id: SessionId,
        user_id: UserId,
        request: &SessionEndDBRequest,
    ) -> Result<Option<SessionDBResponse>> {
        let session = sqlx::query_as::<_, SessionDBResponse>(
            r#"
            WITH closed AS (
                UPDATE sessions
                SET ended_at = now(),
                    is_active = false,
                    duration_minutes = GREATEST(FLOOR(EXTRACT(EPOCH FROM (now() - started_at)) / 60), 0)::int,
                    problems_solved = $3,
                    topics_studied = $4,
                    notes = COALESCE($5, notes)
                WHERE id = $1 AND user_id = $2 AND is_active
                RETURNING *
            )
            SELECT closed.*, r.name AS resource_name, r.icon AS resource_icon
            FROM closed
            JOIN resources r ON r.id = closed.resource_id
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(request.problems_solved)
        .bind(&request.topics_studied)
        .bind(&request.notes)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(session)
    }

    /// Completed sessions on or after the given date, oldest first (analytics input)
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn completed_since(&mut self, user_id: UserId, since: NaiveDate) -> Result<Vec<CompletedSessionRow>> {
        let rows = sqlx::query_as::<_, CompletedSessionRow>(
            r#"
            SELECT r.name AS resource_name, s.session_date, s.duration_minutes, s.problems_solved
            FROM sessions s
            JOIN resources r ON r.id = s.resource_id
            WHERE s.user_id = $1 AND NOT s.is_active AND s.session_date >= $2
            ORDER BY s.session_date
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Sessions<'c> {
    type CreateRequest = SessionCreateDBRequest;
    type Response = SessionDBResponse;
    type Id = SessionId;
    type Filter = SessionFilter;

    /// Insert an open session. The `sessions_one_active_per_user` partial
    /// unique index rejects a second concurrent start.
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let session = sqlx::query_as::<_, SessionDBResponse>(
            r#"
            WITH inserted AS (
                INSERT INTO sessions (user_id, resource_id)
                VALUES ($1, $2)
                RETURNING *
            )
            SELECT inserted.*, r.name AS resource_name, r.icon AS resource_icon
            FROM inserted
            JOIN resources r ON r.id = inserted.resource_id
            "#,
        )
        .bind(request.user_id)
        .bind(request.resource_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(session)
    }

    #[instrument(skip(self), fields(session_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let session = sqlx::query_as::<_, SessionDBResponse>(
            r#"
            SELECT s.*, r.name AS resource_name, r.icon AS resource_icon
            FROM sessions s
            JOIN resources r ON r.id = s.resource_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(session)
    }

    /// Completed-session history, most recent first
    #[instrument(skip(self), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::new(
            "SELECT s.*, r.name AS resource_name, r.icon AS resource_icon \
             FROM sessions s JOIN resources r ON r.id = s.resource_id \
             WHERE NOT s.is_active AND s.user_id = ",
        );
        query.push_bind(filter.user_id);

        if let Some(since) = filter.since {
            query.push(" AND s.session_date >= ");
            query.push_bind(since);
        }
        if let Some(resource_id) = filter.resource_id {
            query.push(" AND s.resource_id = ");
            query.push_bind(resource_id);
        }

        query.push(" ORDER BY s.started_at DESC LIMIT ");
        query.push_bind(filter.limit);

        let sessions = query.build_query_as::<SessionDBResponse>().fetch_all(&mut *self.db).await?;

        Ok(sessions)
    }

    #[instrument(skip(self), fields(session_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
