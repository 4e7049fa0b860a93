//! Play and stop: the create-or-update path that makes a media source
//! present in a scene, and its teardown.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use scenecast_core::{audio, presence, AppState, Placement, PlacementRequest};
use scenecast_obs::media_action;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub file: Option<String>,
    pub source_name: Option<String>,
    pub scene_name: Option<String>,
    pub layer: Option<i64>,
    pub width_pct: Option<f64>,
    pub height_pct: Option<f64>,
    pub left_pct: Option<f64>,
    pub top_pct: Option<f64>,
    #[serde(default)]
    pub restart: bool,
}

pub async fn play(
    State(state): State<AppState>,
    Json(req): Json<PlayRequest>,
) -> Result<Json<Value>, ApiError> {
    let file = req
        .file
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::BadRequest("file and sourceName are required"))?;
    let source = req
        .source_name
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::BadRequest("file and sourceName are required"))?;

    let placement = Placement::resolve(
        source,
        file,
        PlacementRequest {
            scene: req.scene_name,
            layer: req.layer,
            width_pct: req.width_pct,
            height_pct: req.height_pct,
            left_pct: req.left_pct,
            top_pct: req.top_pct,
        },
        &state.config,
    );

    let client = state.obs.ensure_connected().await?;
    audio::set_sources_muted(&client, &state.config.mute_sources, true).await?;
    presence::ensure_media_source(&client, &placement).await?;

    let action = if req.restart {
        media_action::RESTART
    } else {
        media_action::PLAY
    };
    client
        .trigger_media_input_action(&placement.source, action)
        .await?;

    Ok(Json(json!({ "ok": true })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRequest {
    pub source_name: Option<String>,
    pub scene_name: Option<String>,
    #[serde(default)]
    pub clear: bool,
}

pub async fn stop(
    State(state): State<AppState>,
    Json(req): Json<StopRequest>,
) -> Result<Json<Value>, ApiError> {
    let source = req
        .source_name
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::BadRequest("sourceName is required"))?;
    let scene = req
        .scene_name
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| state.config.default_scene.clone());

    let client = state.obs.ensure_connected().await?;
    if req.clear {
        presence::remove_source(&client, &source).await?;
    } else {
        presence::hide_source(&client, &scene, &source).await?;
    }
    // Un-mute on both branches; an error above has already returned.
    audio::set_sources_muted(&client, &state.config.mute_sources, false).await?;

    Ok(Json(json!({ "ok": true })))
}
