//! Typed wrappers over [`ObsClient::call`] for the request types the
//! gateway issues.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::ObsClient;
use crate::error::ObsError;

/// TriggerMediaInputAction values.
pub mod media_action {
    pub const PLAY: &str = "OBS_WEBSOCKET_MEDIA_INPUT_ACTION_PLAY";
    pub const RESTART: &str = "OBS_WEBSOCKET_MEDIA_INPUT_ACTION_RESTART";
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneItemIdResponse {
    scene_item_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentProgramSceneResponse {
    current_program_scene_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamStatusResponse {
    output_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettings {
    pub base_width: f64,
    pub base_height: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScreenshotResponse {
    image_data: String,
}

fn decode<T: serde::de::DeserializeOwned>(request_type: &str, data: Value) -> Result<T, ObsError> {
    serde_json::from_value(data)
        .map_err(|e| ObsError::Protocol(format!("unexpected {request_type} response: {e}")))
}

impl ObsClient {
    pub async fn get_scene_item_id(&self, scene: &str, source: &str) -> Result<i64, ObsError> {
        let data = self
            .call(
                "GetSceneItemId",
                Some(json!({ "sceneName": scene, "sourceName": source })),
            )
            .await?;
        let response: SceneItemIdResponse = decode("GetSceneItemId", data)?;
        Ok(response.scene_item_id)
    }

    pub async fn set_input_settings(
        &self,
        input: &str,
        settings: Value,
        overlay: bool,
    ) -> Result<(), ObsError> {
        self.call(
            "SetInputSettings",
            Some(json!({
                "inputName": input,
                "inputSettings": settings,
                "overlay": overlay,
            })),
        )
        .await?;
        Ok(())
    }

    pub async fn create_input(
        &self,
        scene: &str,
        input: &str,
        kind: &str,
        settings: Value,
        enabled: bool,
    ) -> Result<i64, ObsError> {
        let data = self
            .call(
                "CreateInput",
                Some(json!({
                    "sceneName": scene,
                    "inputName": input,
                    "inputKind": kind,
                    "inputSettings": settings,
                    "sceneItemEnabled": enabled,
                })),
            )
            .await?;
        let response: SceneItemIdResponse = decode("CreateInput", data)?;
        Ok(response.scene_item_id)
    }

    pub async fn set_scene_item_enabled(
        &self,
        scene: &str,
        item_id: i64,
        enabled: bool,
    ) -> Result<(), ObsError> {
        self.call(
            "SetSceneItemEnabled",
            Some(json!({
                "sceneName": scene,
                "sceneItemId": item_id,
                "sceneItemEnabled": enabled,
            })),
        )
        .await?;
        Ok(())
    }

    pub async fn set_scene_item_index(
        &self,
        scene: &str,
        item_id: i64,
        index: i64,
    ) -> Result<(), ObsError> {
        self.call(
            "SetSceneItemIndex",
            Some(json!({
                "sceneName": scene,
                "sceneItemId": item_id,
                "sceneItemIndex": index,
            })),
        )
        .await?;
        Ok(())
    }

    pub async fn set_scene_item_transform(
        &self,
        scene: &str,
        item_id: i64,
        transform: Value,
    ) -> Result<(), ObsError> {
        self.call(
            "SetSceneItemTransform",
            Some(json!({
                "sceneName": scene,
                "sceneItemId": item_id,
                "sceneItemTransform": transform,
            })),
        )
        .await?;
        Ok(())
    }

    pub async fn trigger_media_input_action(
        &self,
        input: &str,
        action: &str,
    ) -> Result<(), ObsError> {
        self.call(
            "TriggerMediaInputAction",
            Some(json!({ "inputName": input, "mediaAction": action })),
        )
        .await?;
        Ok(())
    }

    pub async fn remove_input(&self, input: &str) -> Result<(), ObsError> {
        self.call("RemoveInput", Some(json!({ "inputName": input })))
            .await?;
        Ok(())
    }

    pub async fn set_input_mute(&self, input: &str, muted: bool) -> Result<(), ObsError> {
        self.call(
            "SetInputMute",
            Some(json!({ "inputName": input, "inputMuted": muted })),
        )
        .await?;
        Ok(())
    }

    pub async fn get_current_program_scene(&self) -> Result<String, ObsError> {
        let data = self.call("GetCurrentProgramScene", None).await?;
        let response: CurrentProgramSceneResponse = decode("GetCurrentProgramScene", data)?;
        Ok(response.current_program_scene_name)
    }

    pub async fn set_current_program_scene(&self, scene: &str) -> Result<(), ObsError> {
        self.call(
            "SetCurrentProgramScene",
            Some(json!({ "sceneName": scene })),
        )
        .await?;
        Ok(())
    }

    pub async fn get_stream_status(&self) -> Result<bool, ObsError> {
        let data = self.call("GetStreamStatus", None).await?;
        let response: StreamStatusResponse = decode("GetStreamStatus", data)?;
        Ok(response.output_active)
    }

    pub async fn start_stream(&self) -> Result<(), ObsError> {
        self.call("StartStream", None).await?;
        Ok(())
    }

    pub async fn stop_stream(&self) -> Result<(), ObsError> {
        self.call("StopStream", None).await?;
        Ok(())
    }

    pub async fn get_video_settings(&self) -> Result<VideoSettings, ObsError> {
        let data = self.call("GetVideoSettings", None).await?;
        decode("GetVideoSettings", data)
    }

    pub async fn get_source_screenshot(
        &self,
        source: &str,
        format: &str,
        width: u32,
        height: u32,
    ) -> Result<String, ObsError> {
        let data = self
            .call(
                "GetSourceScreenshot",
                Some(json!({
                    "sourceName": source,
                    "imageFormat": format,
                    "imageWidth": width,
                    "imageHeight": height,
                    "imageCompressionQuality": 80,
                })),
            )
            .await?;
        let response: ScreenshotResponse = decode("GetSourceScreenshot", data)?;
        Ok(response.image_data)
    }
}
