use axum::{extract::State, Json};
use serde_json::{json, Value};

use scenecast_core::AppState;

use crate::error::ApiError;

pub async fn start(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let client = state.obs.ensure_connected().await?;
    client.start_stream().await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn stop(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let client = state.obs.ensure_connected().await?;
    client.stop_stream().await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn status(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let client = state.obs.ensure_connected().await?;
    let streaming = client.get_stream_status().await?;
    Ok(Json(json!({ "ok": true, "streaming": streaming })))
}
