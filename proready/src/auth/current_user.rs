//! Bearer-token extraction of the authenticated user.

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{instrument, trace};

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let auth_header = parts.headers.get(axum::http::header::AUTHORIZATION).ok_or_else(|| {
            trace!("No authorization header in request");
            Error::Unauthenticated { message: None }
        })?;

        let auth_str = auth_header.to_str().map_err(|e| Error::BadRequest {
            message: format!("Invalid authorization header: {e}"),
        })?;

        let token = auth_str.strip_prefix("Bearer ").ok_or(Error::Unauthenticated {
            message: Some("Expected a Bearer token".to_string()),
        })?;

        session::verify_session_token(token, &state.config)
    }
}
