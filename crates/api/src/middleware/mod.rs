//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- extracts the authenticated account from a JWT
//!   Bearer access token.
//! - [`refresh::RefreshSession`] -- extracts verified refresh-token claims
//!   from the refresh cookie.

pub mod auth;
pub mod refresh;
