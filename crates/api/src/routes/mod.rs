pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup   register account (public)
/// /auth/login    authenticate (public)
/// /auth/refresh  renew access token (refresh cookie)
/// /auth/me       current account (requires access token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/auth", auth::router())
}
