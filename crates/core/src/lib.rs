//! Domain types for the keygate authentication service.
//!
//! - [`types`] -- shared ID and timestamp aliases.
//! - [`error`] -- the domain error enum mapped to HTTP statuses by the api crate.
//! - [`roles`] -- the account role model and the privileged-role grant policy.

pub mod error;
pub mod roles;
pub mod types;
