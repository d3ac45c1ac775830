//! JWT access- and refresh-token generation and validation.
//!
//! Both token kinds are HS256-signed JWTs carrying a [`Claims`] payload with
//! independent lifetimes. A `kind` claim distinguishes them, so a refresh
//! token presented where an access token is expected fails verification (and
//! vice versa). Tokens are stateless: nothing is persisted server-side, and
//! rotating the secret invalidates every outstanding token.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use keygate_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of the two token families a JWT belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account's internal database id.
    pub sub: DbId,
    /// The account's role name (`"user"` or `"admin"`).
    pub role: String,
    /// Token family, checked on every verification.
    pub kind: TokenKind,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit correlation.
    pub jti: String,
}

/// Token verification/creation failure.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Signature and expiry were valid but the `kind` claim did not match
    /// what the call site expected.
    #[error("unexpected token kind")]
    KindMismatch,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify both token kinds.
    pub secret: String,
    /// Access token lifetime in seconds (default: 900).
    pub access_ttl_secs: i64,
    /// Refresh token lifetime in seconds (default: 604800, i.e. 7 days).
    pub refresh_ttl_secs: i64,
}

/// Default access token expiry: 15 minutes.
const DEFAULT_ACCESS_TTL_SECS: i64 = 900;
/// Default refresh token expiry: 7 days.
const DEFAULT_REFRESH_TTL_SECS: i64 = 604_800;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var       | Required | Default  |
    /// |---------------|----------|----------|
    /// | `JWT_SECRET`  | **yes**  | --       |
    /// | `ACCESS_TTL`  | no       | `900`    |
    /// | `REFRESH_TTL` | no       | `604800` |
    ///
    /// TTLs are plain seconds.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_ttl_secs: i64 = std::env::var("ACCESS_TTL")
            .unwrap_or_else(|_| DEFAULT_ACCESS_TTL_SECS.to_string())
            .parse()
            .expect("ACCESS_TTL must be a valid i64");

        let refresh_ttl_secs: i64 = std::env::var("REFRESH_TTL")
            .unwrap_or_else(|_| DEFAULT_REFRESH_TTL_SECS.to_string())
            .parse()
            .expect("REFRESH_TTL must be a valid i64");

        Self {
            secret,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }
}

/// Generate an HS256 access token for the given account.
pub fn sign_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    sign(user_id, role, TokenKind::Access, config.access_ttl_secs, config)
}

/// Generate an HS256 refresh token for the given account.
///
/// Structurally identical to an access token apart from the `kind` claim and
/// the longer lifetime. Delivery is the caller's concern (the handlers put it
/// in an HTTP-only cookie, never a response body).
pub fn sign_refresh_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    sign(
        user_id,
        role,
        TokenKind::Refresh,
        config.refresh_ttl_secs,
        config,
    )
}

fn sign(
    user_id: DbId,
    role: &str,
    kind: TokenKind,
    ttl_secs: i64,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        kind,
        exp: now + ttl_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(token)
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration, then checks the `kind` claim
/// against `expected_kind`. The kind check is what stops a refresh token
/// being replayed as an access credential and an access token being fed to
/// the refresh endpoint.
pub fn verify_token(
    token: &str,
    expected_kind: TokenKind,
    config: &JwtConfig,
) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;

    if token_data.claims.kind != expected_kind {
        return Err(TokenError::KindMismatch);
    }
    Ok(token_data.claims)
}
