//! Request handlers.
//!
//! Handlers validate the request body into typed values, delegate to the
//! repositories in `keygate_db` and the token/password primitives in
//! [`crate::auth`], and map errors via [`crate::error::AppError`].

pub mod auth;
