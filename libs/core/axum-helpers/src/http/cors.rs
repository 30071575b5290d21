use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, Environment};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// CORS layer restricted to `allowed_origins`.
///
/// Allows the verbs the API uses plus `OPTIONS`, the `Content-Type` and
/// `Accept` headers, and caches preflight results for an hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Allows any origin. Development only.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Build the CORS layer from `CORS_ALLOWED_ORIGIN` (comma-separated).
///
/// When unset, development allows any origin and production allows none.
pub fn cors_from_env(environment: &Environment) -> Result<CorsLayer, ConfigError> {
    match std::env::var("CORS_ALLOWED_ORIGIN") {
        Ok(raw) => {
            let origins = parse_origins(&raw)?;
            info!(origins = %raw, "CORS restricted to configured origins");
            Ok(create_cors_layer(origins))
        }
        Err(_) if environment.is_development() => {
            info!("CORS_ALLOWED_ORIGIN not set, allowing any origin in development");
            Ok(create_permissive_cors_layer())
        }
        Err(_) => Ok(CorsLayer::new()),
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>().map_err(|e| ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: format!("{}: {}", s, e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::ParseError {
            key: "CORS_ALLOWED_ORIGIN".to_string(),
            details: "no origins listed".to_string(),
        });
    }

    Ok(origins)
}
