//! Study session lifecycle and analytics.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    AppState,
    api::models::{
        sessions::{AnalyticsQuery, SessionEndRequest, SessionListQuery, SessionResponse, SessionStartRequest},
        users::CurrentUser,
    },
    db::{
        handlers::{Repository, Resources, Sessions, Streaks, sessions::SessionFilter},
        models::sessions::{SessionCreateDBRequest, SessionEndDBRequest},
    },
    errors::{Error, Result},
    tracking::{
        analytics::{AnalyticsSummary, aggregate},
        streak::StreakState,
    },
};

const MAX_HISTORY_LIMIT: i64 = 200;

/// Start a study session against a resource.
///
/// Only one session may be open at a time; a second start is rejected.
#[tracing::instrument(skip_all)]
pub async fn start_session(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<SessionStartRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    // The resource must exist and be visible to the caller
    let mut resources = Resources::new(&mut pool_conn);
    let visible = resources
        .get_by_id(request.resource_id)
        .await?
        .is_some_and(|r| !r.is_custom || r.user_id == Some(current_user.id));
    if !visible {
        return Err(Error::NotFound {
            resource: "Resource".to_string(),
            id: request.resource_id.to_string(),
        });
    }

    let mut sessions = Sessions::new(&mut pool_conn);
    let session = sessions
        .create(&SessionCreateDBRequest {
            user_id: current_user.id,
            resource_id: request.resource_id,
        })
        .await
        .map_err(|e| {
            if e.is_unique_on("sessions_one_active_per_user") {
                Error::BadRequest {
                    message: "You already have an active session".to_string(),
                }
            } else {
                Error::Database(e)
            }
        })?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// End a session by id and advance the caller's streaks.
///
/// 404 unless an active session with that id belongs to the caller.
/// The session close and both streak writes commit atomically.
#[tracing::instrument(skip_all)]
pub async fn end_session(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<SessionEndRequest>,
) -> Result<Json<SessionResponse>> {
    let details = request.activity_details;
    if details.problems_solved < 0 {
        return Err(Error::BadRequest {
            message: "problems_solved cannot be negative".to_string(),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let mut sessions = Sessions::new(&mut tx);
    let session = sessions
        .end_session(
            request.session_id,
            current_user.id,
            &SessionEndDBRequest {
                problems_solved: details.problems_solved,
                topics_studied: details.topics_studied,
                notes: details.notes,
            },
        )
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Session".to_string(),
            id: request.session_id.to_string(),
        })?;

    // Streaks advance on the day the session ended
    let today = session.ended_at.map_or(session.session_date, |t| t.date_naive());
    let mut streaks = Streaks::new(&mut tx);

    let overall = streaks.get_or_create(current_user.id).await?;
    let advanced = StreakState::from(&overall).advanced(today);
    streaks.save(current_user.id, &advanced).await?;

    let resource_streak = streaks.get_or_create_for_resource(current_user.id, session.resource_id).await?;
    let advanced = StreakState::from(&resource_streak).advanced(today);
    streaks.save_for_resource(current_user.id, session.resource_id, &advanced).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(SessionResponse::from(session)))
}

/// The caller's currently open session, if any
#[tracing::instrument(skip_all)]
pub async fn active_session(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Option<SessionResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut sessions = Sessions::new(&mut pool_conn);

    let session = sessions.find_active(current_user.id).await?;

    Ok(Json(session.map(SessionResponse::from)))
}

/// Session history, most recent first
#[tracing::instrument(skip_all)]
pub async fn list_sessions(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<Vec<SessionResponse>>> {
    let mut filter = SessionFilter::for_user(current_user.id);
    filter.since = query.period.map(|p| p.lower_bound(Utc::now().date_naive()));
    filter.resource_id = query.resource_id;
    if let Some(limit) = query.limit {
        filter.limit = limit.clamp(1, MAX_HISTORY_LIMIT);
    }

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut sessions = Sessions::new(&mut pool_conn);

    let history = sessions.list(&filter).await?;

    Ok(Json(history.into_iter().map(SessionResponse::from).collect()))
}

/// Aggregated totals over the requested period
#[tracing::instrument(skip_all)]
pub async fn analytics(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsSummary>> {
    let since = query.period.lower_bound(Utc::now().date_naive());

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut sessions = Sessions::new(&mut pool_conn);

    let rows = sessions.completed_since(current_user.id, since).await?;

    Ok(Json(aggregate(query.period, &rows)))
}
