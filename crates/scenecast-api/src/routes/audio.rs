use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use scenecast_core::AppState;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteRequest {
    pub input_name: Option<String>,
    /// Presence gates validation, not truthiness: an explicit `false`
    /// is a valid un-mute request.
    pub mute: Option<bool>,
}

pub async fn mute(
    State(state): State<AppState>,
    Json(req): Json<MuteRequest>,
) -> Result<Json<Value>, ApiError> {
    let input = req
        .input_name
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::BadRequest("inputName and mute are required"))?;
    let muted = req
        .mute
        .ok_or(ApiError::BadRequest("inputName and mute are required"))?;

    let client = state.obs.ensure_connected().await?;
    client.set_input_mute(&input, muted).await?;

    Ok(Json(json!({ "ok": true })))
}
