use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_backoff};

/// Open a connection pool using `config`.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let max_connections = config.max_connections;
    let db = Database::connect(config.into_connect_options()).await?;
    info!(max_connections, "Connected to PostgreSQL");
    Ok(db)
}

/// Open a connection pool, retrying with exponential backoff.
///
/// Meant for startup, where the database may come up after the service.
/// `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    retry_with_backoff(
        || connect_from_config(config.clone()),
        retry_config.unwrap_or_default(),
    )
    .await
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DatabaseError> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}
