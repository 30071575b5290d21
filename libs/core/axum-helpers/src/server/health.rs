use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use core_config::AppInfo;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

/// Liveness payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
}

/// Readiness payload: overall status plus `"connected"`/`"disconnected"` per check.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: BTreeMap<String, String>,
}

/// A boxed readiness probe; `Err` carries the reason it failed.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Run all probes concurrently.
///
/// Returns `200` when every probe passes and `503` otherwise.
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> (StatusCode, Json<ReadyResponse>) {
    let (names, probes): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let results = join_all(probes).await;

    let mut all_healthy = true;
    let mut statuses = BTreeMap::new();

    for (name, result) in names.into_iter().zip(results) {
        let state = match result {
            Ok(()) => "connected",
            Err(reason) => {
                tracing::error!(check = name, reason = %reason, "Readiness check failed");
                all_healthy = false;
                "disconnected"
            }
        };
        statuses.insert(name.to_string(), state.to_string());
    }

    let (status, label) = if all_healthy {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    };

    (
        status,
        Json(ReadyResponse {
            status: label.to_string(),
            checks: statuses,
        }),
    )
}

/// `GET /health`: always `200` while the process is serving.
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: app.name.to_string(),
        version: app.version.to_string(),
    })
}

/// Router exposing `/health` for the given app.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
