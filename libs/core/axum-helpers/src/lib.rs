//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`errors`]**: `AppError` and the uniform JSON error body
//! - **[`extractors`]**: `IdPath` and `ValidatedJson`
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router assembly, health/readiness, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{IdPath, ValidatedJson};
pub use http::{cors_from_env, create_cors_layer, create_permissive_cors_layer, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, serve_with_shutdown, shutdown_signal,
};
