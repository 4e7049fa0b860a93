use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use scenecast_core::AppState;
use scenecast_obs::ObsError;

use crate::error::ApiError;

/// Unlike every other endpoint, the failure body carries `ok: false`
/// alongside the error message; callers poll this to light a status dot.
pub async fn heartbeat(State(state): State<AppState>) -> Response {
    match current_scene(&state).await {
        Ok(scene) => (StatusCode::OK, Json(json!({ "ok": true, "scene": scene }))).into_response(),
        Err(err) => {
            tracing::error!("heartbeat failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

async fn current_scene(state: &AppState) -> Result<String, ObsError> {
    let client = state.obs.ensure_connected().await?;
    client.get_current_program_scene().await
}

#[derive(Debug, Deserialize)]
pub struct ScreenshotParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

pub async fn screenshot(
    State(state): State<AppState>,
    Query(params): Query<ScreenshotParams>,
) -> Result<Json<Value>, ApiError> {
    let client = state.obs.ensure_connected().await?;
    let scene = client.get_current_program_scene().await?;
    let image = client
        .get_source_screenshot(
            &scene,
            "png",
            params.width.unwrap_or(480),
            params.height.unwrap_or(270),
        )
        .await?;
    Ok(Json(json!({ "ok": true, "image": image })))
}
