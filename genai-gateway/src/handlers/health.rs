use crate::startup::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "genai-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the model credential is set and the scratch directory
/// is still there.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.provider.health_check().await {
        tracing::warn!(error = %e, "Model provider not ready");
        return StatusCode::SERVICE_UNAVAILABLE;
    }

    match tokio::fs::metadata(state.stager.scratch_dir()).await {
        Ok(meta) if meta.is_dir() => StatusCode::OK,
        _ => {
            tracing::warn!(
                scratch_dir = %state.stager.scratch_dir().display(),
                "Scratch directory unavailable"
            );
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
