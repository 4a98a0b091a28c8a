//! Robodex Server Entry Point
//!
//! Bootstraps logging and configuration, opens the stores and starts the
//! Axum HTTP server.

use robodex_api::telemetry::{init_tracer, TelemetryConfig};
use robodex_api::{build_app, ApiError, ApiResult, ServerConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracer(&TelemetryConfig::default())?;

    let config = ServerConfig::from_env()?;
    let app = build_app(&config).await?;

    let addr = config.bind_addr()?;
    tracing::info!(%addr, web_root = %config.web_root.display(), "Starting Robodex server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
