//! Account roles and the privileged-role grant policy.
//!
//! Roles are fixed at signup and immutable afterwards. The `admin` role can
//! only be self-assigned by presenting the server-side admin secret; the
//! check runs before any account row is written.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::CoreError;

/// Role granted to an account at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

/// Decide which role a signup request is granted.
///
/// - `"user"` is granted unconditionally.
/// - `"admin"` requires `provided_secret` to match the configured admin
///   secret; a missing or wrong secret is rejected with `Forbidden`.
/// - Any other requested role is rejected with `Validation`.
///
/// The secret comparison is constant-time so response latency does not leak
/// how much of a guessed secret matched.
pub fn resolve_role(
    requested: &str,
    provided_secret: Option<&str>,
    admin_secret: &str,
) -> Result<Role, CoreError> {
    match requested.parse::<Role>()? {
        Role::User => Ok(Role::User),
        Role::Admin => {
            let provided = provided_secret.unwrap_or("");
            if secrets_match(provided, admin_secret) {
                Ok(Role::Admin)
            } else {
                Err(CoreError::Forbidden("Invalid admin secret".into()))
            }
        }
    }
}

/// Constant-time string equality. The length check leaks length only.
fn secrets_match(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        return false;
    }
    provided.ct_eq(expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "correct-admin-secret";

    #[test]
    fn test_user_role_granted_without_secret() {
        let role = resolve_role("user", None, SECRET).expect("user role should be granted");
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_admin_role_with_correct_secret() {
        let role =
            resolve_role("admin", Some(SECRET), SECRET).expect("admin role should be granted");
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_admin_role_with_wrong_secret_forbidden() {
        let result = resolve_role("admin", Some("guess"), SECRET);
        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }

    #[test]
    fn test_admin_role_with_missing_secret_forbidden() {
        let result = resolve_role("admin", None, SECRET);
        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = resolve_role("superuser", None, SECRET);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!("user".parse::<Role>().unwrap().as_str(), "user");
        assert_eq!("admin".parse::<Role>().unwrap().as_str(), "admin");
    }
}
