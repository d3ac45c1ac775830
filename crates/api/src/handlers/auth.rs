//! Handlers for the `/auth` resource (signup, login, refresh, me).

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use keygate_core::error::CoreError;
use keygate_core::roles::resolve_role;
use keygate_db::models::user::{CreateUser, PublicUser, User};
use keygate_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{sign_access_token, sign_refresh_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::refresh::{RefreshSession, REFRESH_COOKIE};
use crate::response::DataResponse;
use crate::state::AppState;

/// Generic message for both the unknown-email and wrong-password login
/// failures, so responses never reveal which accounts exist.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
///
/// All fields are optional at the serde layer; presence is validated
/// explicitly so a missing field is a 400, not a deserialization artifact.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub admin_secret: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Tokens block of the success envelope. The refresh token is deliberately
/// absent: it travels only in the [`REFRESH_COOKIE`] cookie.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub access_token: String,
}

/// `data` payload for signup and login responses.
#[derive(Debug, Serialize)]
pub struct SessionData {
    pub user: PublicUser,
    pub tokens: TokenPayload,
}

/// Success envelope for signup and login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub message: &'static str,
    pub data: SessionData,
}

/// `data` payload for refresh responses (tokens only, no user).
#[derive(Debug, Serialize)]
pub struct RefreshData {
    pub tokens: TokenPayload,
}

/// Success envelope for refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: &'static str,
    pub data: RefreshData,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a new account. The role policy runs strictly before any row is
/// written, so a rejected admin request leaves nothing behind.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<SignupRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let email = required(input.email, "email")?.trim().to_lowercase();
    let password = required(input.password, "password")?;
    let first_name = required(input.first_name, "firstName")?;
    let last_name = required(input.last_name, "lastName")?;
    let requested_role = required(input.role, "role")?;

    // Pre-check for a friendlier conflict; the uq_users_email constraint is
    // the atomic backstop if two signups race past this.
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    // Policy gate: admin self-assignment needs the configured secret. Runs
    // before any row is written.
    let role = resolve_role(
        &requested_role,
        input.admin_secret.as_deref(),
        &state.config.admin_secret,
    )
    .map_err(AppError::Core)?;

    let hashed = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        email,
        password_hash: hashed,
        first_name,
        last_name,
        role: role.as_str().to_string(),
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(user_id = user.id, role = %user.role, "account created");

    let (jar, response) = establish_session(jar, &state.config, &user, "Signup successful")?;
    Ok((jar, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. The unknown-email and wrong-password
/// paths produce identical responses.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let email = required(input.email, "email")?.trim().to_lowercase();
    let password = required(input.password, "password")?;

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let (jar, response) = establish_session(jar, &state.config, &user, "Login successful")?;
    Ok((jar, Json(response)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh cookie for a fresh access token. No new refresh
/// token is issued; the cookie keeps its original expiry.
pub async fn refresh(
    State(state): State<AppState>,
    session: RefreshSession,
) -> AppResult<Json<RefreshResponse>> {
    let access_token = sign_access_token(session.user_id, &session.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(RefreshResponse {
        message: "Token refreshed",
        data: RefreshData {
            tokens: TokenPayload { access_token },
        },
    }))
}

/// GET /api/v1/auth/me
///
/// Return the authenticated account's public fields.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<PublicUser>>> {
    let account = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
        })?;

    Ok(Json(DataResponse {
        data: account.to_public(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate that an optional request field is present and non-blank.
fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!(
            "Missing required field: {name}"
        ))),
    }
}

/// Mint both tokens for the account, attach the refresh cookie, and build
/// the success envelope. The access token is the only token in the body.
fn establish_session(
    jar: CookieJar,
    config: &ServerConfig,
    user: &User,
    message: &'static str,
) -> Result<(CookieJar, SessionResponse), AppError> {
    let access_token = sign_access_token(user.id, &user.role, &config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh_token = sign_refresh_token(user.id, &user.role, &config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let jar = jar.add(refresh_cookie(refresh_token, &config.jwt));

    Ok((
        jar,
        SessionResponse {
            message,
            data: SessionData {
                user: user.to_public(),
                tokens: TokenPayload { access_token },
            },
        },
    ))
}

/// Build the secured refresh cookie: HTTP-only, secure-transport-only,
/// strict same-site, scoped to the auth endpoints, expiring with the token.
fn refresh_cookie(token: String, config: &JwtConfig) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/api/v1/auth")
        .max_age(time::Duration::seconds(config.refresh_ttl_secs))
        .build()
}
