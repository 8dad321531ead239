//! Shared application state passed to the routers.

/// Cloned per router; the connection is an Arc-backed pool.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
