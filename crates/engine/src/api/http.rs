//! HTTP routes.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use taleforge_shared::{tool_catalog, EncounterRequest, ErrorCode, ResponseResult, ToolDescriptor};

use super::error_sanitizer::sanitize_repo_error;
use super::tools::ToolDispatcher;
use crate::app::App;

const SERVICE_NAME: &str = "taleforge";

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/call", post(call_tool))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": SERVICE_NAME}))
}

async fn list_tools() -> Json<Vec<ToolDescriptor>> {
    Json(tool_catalog())
}

/// Takes the raw body so non-JSON payloads, unknown tools and malformed
/// arguments come back as a `bad_request` result instead of axum's
/// plain-text rejection.
async fn call_tool(
    State(app): State<Arc<App>>,
    body: Bytes,
) -> Result<Json<ResponseResult>, ApiError> {
    let request: EncounterRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return Ok(Json(ResponseResult::error(
                ErrorCode::BadRequest,
                format!("Invalid tool call: {e}"),
            )))
        }
    };

    let tool = request.tool_name();
    tracing::debug!(tool, "Tool call");

    let result = ToolDispatcher::new(&app.use_cases.encounter)
        .dispatch(request)
        .await
        .map_err(|e| ApiError::Internal(sanitize_repo_error(&e, &format!("run {tool}"))))?;
    Ok(Json(result))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}
