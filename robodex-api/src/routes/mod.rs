//! REST API Routes Module
//!
//! Includes:
//! - Robot CRUD routes (`/add_robot`, `/update_robot/:index`, `/delete_robot/:index`, `/robots`)
//! - Health check at `/health`
//! - Static frontend and uploaded images with SPA fallback for everything else
//! - CORS support for browser-based clients

pub mod health;
pub mod robot;
pub mod static_files;

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::services::RobotService;
use crate::telemetry::http_trace_layer;

pub use health::create_router as health_router;
pub use robot::create_router as robot_router;
pub use static_files::static_service;

const CORS_MAX_AGE_SECS: u64 = 86400;

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ServerConfig.
///
/// With no configured origins every origin is allowed.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        tracing::info!("CORS: allowing origins: {:?}", config.cors_origins);
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete router.
///
/// # Layer Order (outer to inner)
/// 1. CORS - answers preflight requests
/// 2. HTTP tracing
/// 3. Body limit (disabled unless configured)
pub fn create_api_router(service: RobotService, config: &ServerConfig) -> Router {
    let body_limit = match config.max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .merge(robot::create_router(service.clone()))
        .merge(health::create_router(service))
        .fallback_service(static_service(&config.web_root, &config.index_path()))
        .layer(body_limit)
        .layer(http_trace_layer())
        .layer(build_cors_layer(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn preflight_allow_origin(config: &ServerConfig, origin: &str) -> Option<String> {
        let app = Router::new()
            .route("/robots", get(|| async { "[]" }))
            .layer(build_cors_layer(config));

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/robots")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let config = ServerConfig::default();
        let allowed = preflight_allow_origin(&config, "https://anywhere.test").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_cors_restricts_to_configured_origins() {
        let config = ServerConfig {
            cors_origins: vec!["https://robots.example".to_string()],
            ..ServerConfig::default()
        };

        let allowed = preflight_allow_origin(&config, "https://robots.example").await;
        assert_eq!(allowed.as_deref(), Some("https://robots.example"));

        let denied = preflight_allow_origin(&config, "https://elsewhere.test").await;
        assert!(denied.is_none());
    }
}
