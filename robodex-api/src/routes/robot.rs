//! Robot REST API Routes
//!
//! Handlers translate multipart forms and path indices into `RobotService`
//! calls. Mutating routes answer with the full updated list.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, FromRequest, Multipart, Path, Request, State},
    http::header,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Form, Json, Router,
};
use std::collections::HashMap;
use std::sync::Arc;

use robodex_core::ImageUpload;

use crate::{
    error::{ApiError, ApiResult},
    services::RobotService,
    types::{RobotForm, RobotsResponse},
};

pub const MSG_ADDED: &str = "Robot added";
pub const MSG_UPDATED: &str = "Robot updated";
pub const MSG_DELETED: &str = "Robot deleted";

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for robot routes.
#[derive(Clone)]
pub struct RobotState {
    pub service: RobotService,
}

impl RobotState {
    pub fn new(service: RobotService) -> Self {
        Self { service }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /add_robot - Create a robot from a multipart form
pub async fn add_robot(
    State(state): State<Arc<RobotState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<impl IntoResponse> {
    let form = match multipart {
        Ok(multipart) => read_robot_form(multipart).await?,
        // No form at all is reported like an empty one.
        Err(rejection) => {
            tracing::debug!(%rejection, "add_robot without multipart body");
            return Err(ApiError::missing_fields());
        }
    };

    let robots = state.service.create(form.into_new_robot()).await?;
    Ok(Json(RobotsResponse::new(MSG_ADDED, robots)))
}

/// PUT /update_robot/:index - Update the robot at `index`
pub async fn update_robot(
    State(state): State<Arc<RobotState>>,
    Path(raw_index): Path<String>,
    request: Request,
) -> ApiResult<impl IntoResponse> {
    let index = parse_index(&raw_index)?;
    let form = read_update_form(request).await?;

    let (patch, images) = form.into_patch();
    let robots = state.service.update(index, patch, images).await?;
    Ok(Json(RobotsResponse::new(MSG_UPDATED, robots)))
}

/// DELETE /delete_robot/:index - Remove the robot at `index`
pub async fn delete_robot(
    State(state): State<Arc<RobotState>>,
    Path(raw_index): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let index = parse_index(&raw_index)?;
    let robots = state.service.delete(index).await?;
    Ok(Json(RobotsResponse::new(MSG_DELETED, robots)))
}

/// GET /robots - List all robots
pub async fn list_robots(State(state): State<Arc<RobotState>>) -> ApiResult<impl IntoResponse> {
    let robots = state.service.list().await?;
    Ok(Json(robots))
}

// ============================================================================
// HELPERS
// ============================================================================

/// A path segment that is not an integer cannot address a robot.
fn parse_index(raw: &str) -> ApiResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| ApiError::invalid_index())
}

/// Media type of the request body without parameters, lowercased.
fn body_media_type(request: &Request) -> Option<String> {
    let value = request.headers().get(header::CONTENT_TYPE)?.to_str().ok()?;
    let essence = value.split(';').next().unwrap_or_default().trim();
    Some(essence.to_ascii_lowercase())
}

/// Read an update form from a multipart or urlencoded body.
///
/// An empty body is an empty form. Any other body is rejected.
async fn read_update_form(request: Request) -> ApiResult<RobotForm> {
    match body_media_type(&request).as_deref() {
        Some("multipart/form-data") => {
            let multipart = Multipart::from_request(request, &())
                .await
                .map_err(|e| ApiError::invalid_input(format!("Invalid multipart body: {}", e)))?;
            read_robot_form(multipart).await
        }
        Some("application/x-www-form-urlencoded") => {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(request, &())
                .await
                .map_err(|e| ApiError::invalid_input(format!("Invalid form body: {}", e)))?;
            Ok(RobotForm::from_text_fields(fields))
        }
        media_type => {
            let body = Bytes::from_request(request, &())
                .await
                .map_err(|e| ApiError::invalid_input(format!("Unreadable body: {}", e)))?;
            if body.is_empty() {
                tracing::debug!("update_robot without a form body");
                return Ok(RobotForm::default());
            }
            Err(ApiError::invalid_input(format!(
                "Unsupported body type: {}",
                media_type.unwrap_or("none")
            )))
        }
    }
}

/// Collect text fields and image parts from a multipart body.
///
/// File parts under `images` or `images[]` with an empty file name are the
/// browser's "nothing selected" placeholder and are dropped.
async fn read_robot_form(mut multipart: Multipart) -> ApiResult<RobotForm> {
    let mut form = RobotForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_input(format!("Invalid multipart field: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match name.as_str() {
            "author" | "name" | "description" => {
                let text = field.text().await.map_err(|e| {
                    ApiError::invalid_input(format!("Invalid multipart field text: {}", e))
                })?;
                match name.as_str() {
                    "author" => form.author = Some(text),
                    "name" => form.name = Some(text),
                    _ => form.description = Some(text),
                }
            }
            "images" | "images[]" => {
                let file_name = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                if file_name.is_empty() {
                    continue;
                }
                let content_type = field.content_type().map(|s| s.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::invalid_input(format!("Invalid multipart file: {}", e))
                })?;
                form.images
                    .push(ImageUpload::new(file_name, content_type.as_deref(), bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(form)
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the robot CRUD router.
pub fn create_router(service: RobotService) -> Router {
    let state = Arc::new(RobotState::new(service));

    Router::new()
        .route("/add_robot", post(add_robot))
        .route("/update_robot/:index", put(update_robot))
        .route("/delete_robot/:index", delete(delete_robot))
        .route("/robots", get(list_robots))
        .with_state(state)
}
