use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`DB_RUN_MIGRATIONS`)
    pub run_migrations: bool,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?, // Required - DATABASE_URL
            server: ServerConfig::from_env()?,     // Defaults: HOST=0.0.0.0, PORT=8080
            environment: Environment::from_env(),
            run_migrations: env_parse("DB_RUN_MIGRATIONS", "true")?,
        })
    }
}
