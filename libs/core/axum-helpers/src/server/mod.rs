//! Router assembly, health endpoints and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, cors).merge(health_router(app_info!()));
//! create_production_app(router, &config.server, async move { db.close().await.ok(); }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router, serve_with_shutdown};
pub use health::{
    HealthCheckFuture, HealthResponse, ReadyResponse, health_handler, health_router,
    run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
