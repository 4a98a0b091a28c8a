//! Robodex API - HTTP Layer
//!
//! Serves the robot CRUD endpoints and the static single-page frontend.
//! Robots live in a JSON file that every mutation rewrites in full;
//! uploaded images are written to a directory under the web root.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod types;

use std::sync::Arc;

use axum::Router;
use robodex_storage::{DirImageStore, JsonFileStore};

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use services::{ImageIngestor, IngestMode, NewRobot, RobotService};
pub use types::{RobotForm, RobotsResponse};

/// Open the on-disk stores named by `config` and wire the robot service.
///
/// Creates the record file (as `[]`) and the upload directory when missing.
pub async fn build_service(config: &ServerConfig) -> ApiResult<RobotService> {
    let records = JsonFileStore::open(&config.data_file).await?;
    let images = DirImageStore::open(&config.upload_dir).await?;

    tracing::info!(
        data_file = %config.data_file.display(),
        upload_dir = %config.upload_dir.display(),
        "Stores opened"
    );

    Ok(RobotService::new(
        Arc::new(records),
        ImageIngestor::new(Arc::new(images)),
    ))
}

/// Build the full application router for `config`.
pub async fn build_app(config: &ServerConfig) -> ApiResult<Router> {
    let service = build_service(config).await?;
    Ok(create_api_router(service, config))
}
