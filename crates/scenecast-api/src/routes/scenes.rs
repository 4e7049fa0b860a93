use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use scenecast_core::AppState;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneRequest {
    pub scene_name: Option<String>,
}

pub async fn set_scene(
    State(state): State<AppState>,
    Json(req): Json<SceneRequest>,
) -> Result<Json<Value>, ApiError> {
    let scene = req
        .scene_name
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::BadRequest("sceneName is required"))?;

    let client = state.obs.ensure_connected().await?;
    client.set_current_program_scene(&scene).await?;

    Ok(Json(json!({ "ok": true })))
}
