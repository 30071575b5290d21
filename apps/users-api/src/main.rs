use axum_helpers::{
    cors_from_env,
    server::{create_production_app, create_router, health_router},
};
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;
    }

    let state = AppState { config, db };

    let cors = cors_from_env(&state.config.environment)?;
    let router = create_router::<openapi::ApiDoc>(api::routes(&state), cors);

    // - /health: liveness with app name/version
    // - /ready: database round-trip
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting users API"
    );

    let server = state.config.server.clone();
    create_production_app(app, &server, async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(()) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!(error = %e, "Error closing PostgreSQL"),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
