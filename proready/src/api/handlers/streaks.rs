//! Streak reporting.

use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{streaks::StreakResponse, users::CurrentUser},
    db::handlers::Streaks,
    errors::{Error, Result},
};

/// The caller's overall streak plus the per-resource breakdown.
///
/// Users who have never completed a session get a zeroed row rather than 404.
#[tracing::instrument(skip_all)]
pub async fn get_streaks(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<StreakResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut streaks = Streaks::new(&mut tx);

    let overall = streaks.get_or_create(current_user.id).await?;
    let resources = streaks.list_resource_streaks(current_user.id).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(StreakResponse::from_rows(overall, resources)))
}
