//! Database repository for streak rows.
//!
//! The day-boundary arithmetic lives in [`crate::tracking::streak`]; this
//! repository only reads and upserts the stored counters.

use crate::db::{
    errors::Result,
    models::streaks::{ResourceStreakDBResponse, StreakDBResponse},
};
use crate::tracking::streak::StreakState;
use crate::types::{ResourceId, UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Streaks<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Streaks<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// The user's overall streak row, creating a zeroed one on first access
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn get_or_create(&mut self, user_id: UserId) -> Result<StreakDBResponse> {
        let streak = sqlx::query_as::<_, StreakDBResponse>(
            r#"
            INSERT INTO streaks (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING *
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(streak)
    }

    /// Write back the overall streak counters
    #[instrument(skip(self, state), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn save(&mut self, user_id: UserId, state: &StreakState) -> Result<StreakDBResponse> {
        let streak = sqlx::query_as::<_, StreakDBResponse>(
            r#"
            UPDATE streaks
            SET current_streak = $2,
                longest_streak = $3,
                total_session_days = $4,
                last_active_date = $5,
                updated_at = now()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(state.current)
        .bind(state.longest)
        .bind(state.total_days)
        .bind(state.last_active)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(streak)
    }

    /// The per-resource streak row, creating a zeroed one on first access
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id), resource_id = %abbrev_uuid(&resource_id)), err)]
    pub async fn get_or_create_for_resource(&mut self, user_id: UserId, resource_id: ResourceId) -> Result<ResourceStreakDBResponse> {
        let streak = sqlx::query_as::<_, ResourceStreakDBResponse>(
            r#"
            WITH upserted AS (
                INSERT INTO resource_streaks (user_id, resource_id)
                VALUES ($1, $2)
                ON CONFLICT (user_id, resource_id) DO UPDATE SET user_id = EXCLUDED.user_id
                RETURNING *
            )
            SELECT upserted.resource_id, r.name AS resource_name, r.icon AS resource_icon,
                   upserted.current_streak, upserted.longest_streak, upserted.last_active_date
            FROM upserted
            JOIN resources r ON r.id = upserted.resource_id
            "#,
        )
        .bind(user_id)
        .bind(resource_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(streak)
    }

    /// Write back the per-resource streak counters
    #[instrument(skip(self, state), fields(user_id = %abbrev_uuid(&user_id), resource_id = %abbrev_uuid(&resource_id)), err)]
    pub async fn save_for_resource(&mut self, user_id: UserId, resource_id: ResourceId, state: &StreakState) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE resource_streaks
            SET current_streak = $3,
                longest_streak = $4,
                last_active_date = $5,
                updated_at = now()
            WHERE user_id = $1 AND resource_id = $2
            "#,
        )
        .bind(user_id)
        .bind(resource_id)
        .bind(state.current)
        .bind(state.longest)
        .bind(state.last_active)
        .execute(&mut *self.db)
        .await?;

        Ok(())
    }

    /// All per-resource streaks for a user, strongest first
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn list_resource_streaks(&mut self, user_id: UserId) -> Result<Vec<ResourceStreakDBResponse>> {
        let streaks = sqlx::query_as::<_, ResourceStreakDBResponse>(
            r#"
            SELECT rs.resource_id, r.name AS resource_name, r.icon AS resource_icon,
                   rs.current_streak, rs.longest_streak, rs.last_active_date
            FROM resource_streaks rs
            JOIN resources r ON r.id = rs.resource_id
            WHERE rs.user_id = $1
            ORDER BY rs.current_streak DESC, r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(streaks)
    }
}
