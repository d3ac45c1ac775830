use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable. The pool is the only shared mutable resource in the
/// service; configuration is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: keygate_db::DbPool,
    /// Server configuration (secrets, TTLs, bind address).
    pub config: Arc<ServerConfig>,
}
