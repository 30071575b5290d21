use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

/// Wrap the API routes with documentation UIs and cross-cutting middleware.
///
/// - `apis` is nested under `/api`
/// - OpenAPI JSON at `/api-docs/openapi.json`, with Redoc (`/redoc`),
///   RapiDoc (`/rapidoc`) and Scalar (`/scalar`)
/// - JSON 404 fallback, request tracing, security headers, `cors`, compression
///
/// Health routes are merged by the app afterwards so they stay outside `/api`.
pub fn create_router<T>(apis: Router, cors: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", T::openapi()).path("/rapidoc"))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new())
}

/// Bind `server_config.address()` and serve until SIGINT/SIGTERM.
///
/// After in-flight requests drain, `cleanup` runs (e.g. closing the database
/// pool) bounded by `server_config.shutdown_timeout`.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;

    let coordinator = ShutdownCoordinator::new();
    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    serve_with_shutdown(
        listener,
        router,
        coordinator,
        server_config.shutdown_timeout,
        cleanup,
    )
    .await
}

/// Serve on `listener` until `coordinator` is shut down, then run `cleanup`.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    cleanup_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(address = %listener.local_addr()?, "Server listening");

    let graceful = coordinator.clone();
    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { graceful.cancelled().await })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server encountered an error"));

    info!(timeout = ?cleanup_timeout, "Running shutdown cleanup");
    match tokio::time::timeout(cleanup_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => warn!(timeout = ?cleanup_timeout, "Cleanup timed out, forcing shutdown"),
    }

    served
}
