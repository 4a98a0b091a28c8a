//! Health Check Endpoint
//!
//! `GET /health` reports whether the record file can be read.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ErrorCode;
use crate::services::RobotService;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    /// Number of stored robots, when the record file is readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Unhealthy,
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Clone)]
pub struct HealthState {
    pub service: RobotService,
    pub start_time: std::time::Instant,
}

impl HealthState {
    pub fn new(service: RobotService) -> Self {
        Self {
            service,
            start_time: std::time::Instant::now(),
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health - Record store readability check
pub async fn health(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let (status, robots, error) = match state.service.list().await {
        Ok(robots) => (HealthStatus::Ok, Some(robots.len()), None),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let message = ErrorCode::StorageError.default_message().to_string();
            (HealthStatus::Unhealthy, None, Some(message))
        }
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        robots,
        error,
    };

    let status_code = if status == HealthStatus::Ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router(service: RobotService) -> Router {
    let state = Arc::new(HealthState::new(service));

    Router::new().route("/health", get(health)).with_state(state)
}
