//! API route handlers
//!
//! - `health`: liveness probe
//! - `scan`: trigger a capture
//! - `images`: download stored artifacts

pub mod health;
pub mod images;
pub mod scan;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service info, the root endpoint (GET /)
pub async fn service_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "scanbridge",
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Scanner system is online. POST /scan to trigger.",
        "endpoints": [
            "/scan",
            "/images/{filename}",
            "/health"
        ]
    })))
}

/// 404 Not Found handler for undefined routes
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
