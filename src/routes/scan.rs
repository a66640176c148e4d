use crate::capture::run_capture;
use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

/// Response from a successful trigger
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub status: String,
    pub message: String,
    pub filename: String,
}

/// Trigger one capture (POST /scan).
///
/// Generates a fresh timestamped filename, runs the capture tool (or the
/// simulated copy) synchronously, and reports the stored filename. One
/// attempt per request; a failed capture surfaces as a structured 500 and
/// leaves the service running.
pub async fn trigger_scan(State(state): State<ServerState>) -> ServerResult<Json<ScanResponse>> {
    tracing::info!("Starting scan");

    let artifact = run_capture(&state.config.capture, &state.output_dir).await?;

    Ok(Json(ScanResponse {
        status: "success".to_string(),
        message: "Scan completed successfully".to_string(),
        filename: artifact.filename,
    }))
}
