//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` public projection safe for API responses
//! - A `Deserialize`-free create DTO for inserts

pub mod user;
