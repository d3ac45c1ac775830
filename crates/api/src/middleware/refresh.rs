//! Refresh-token extractor for the silent renewal endpoint.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use keygate_core::error::CoreError;
use keygate_core::types::DbId;

use crate::auth::jwt::{verify_token, TokenKind};
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Verified refresh-token claims read from the [`REFRESH_COOKIE`] cookie.
///
/// The token is accepted from the cookie only, never from a header or body.
/// A missing cookie, a malformed or expired token, or an access token in the
/// cookie all reject with 401 before the handler runs.
///
/// The account is NOT re-fetched here: a role change between mint and expiry
/// is not reflected until a fresh login.
#[derive(Debug, Clone)]
pub struct RefreshSession {
    /// The account's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The role captured at mint time.
    pub role: String,
}

impl FromRequestParts<AppState> for RefreshSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let cookie = jar.get(REFRESH_COOKIE).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing refresh token".into()))
        })?;

        let claims =
            verify_token(cookie.value(), TokenKind::Refresh, &state.config.jwt).map_err(|_| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid or expired refresh token".into(),
                ))
            })?;

        Ok(RefreshSession {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
