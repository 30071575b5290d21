//! Shared application state passed to route builders and the readiness probe.

/// Cloned per handler; both fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
