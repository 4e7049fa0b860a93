//! Making a media source idempotently present in a scene.

use serde_json::json;
use tracing::debug;

use scenecast_obs::{ObsClient, ObsError};

use crate::placement::Placement;

/// Input kind used for every source the gateway creates.
pub const MEDIA_INPUT_KIND: &str = "ffmpeg_source";

/// Ensure a media source for `placement` exists in its scene, enabled and
/// pointing at the requested file, then apply stacking order and transform.
/// Returns the scene item id.
///
/// Lookup failure is discriminated: only the remote's ResourceNotFound
/// status takes the create path, anything else propagates.
pub async fn ensure_media_source(
    client: &ObsClient,
    placement: &Placement,
) -> Result<i64, ObsError> {
    let settings = json!({ "local_file": placement.file });

    let item_id = match client
        .get_scene_item_id(&placement.scene, &placement.source)
        .await
    {
        Ok(item_id) => {
            debug!(
                "updating existing source '{}' in scene '{}'",
                placement.source, placement.scene
            );
            client
                .set_input_settings(&placement.source, settings, true)
                .await?;
            client
                .set_scene_item_enabled(&placement.scene, item_id, true)
                .await?;
            item_id
        }
        Err(err) if err.is_not_found() => {
            debug!(
                "creating source '{}' in scene '{}'",
                placement.source, placement.scene
            );
            client
                .create_input(
                    &placement.scene,
                    &placement.source,
                    MEDIA_INPUT_KIND,
                    settings,
                    true,
                )
                .await?
        }
        Err(err) => return Err(err),
    };

    if let Some(layer) = placement.layer {
        client
            .set_scene_item_index(&placement.scene, item_id, layer)
            .await?;
    }

    apply_transform(client, placement, item_id).await?;

    Ok(item_id)
}

/// Resolve the proportional placement against the canvas and apply it as a
/// stretched bounding box.
async fn apply_transform(
    client: &ObsClient,
    placement: &Placement,
    item_id: i64,
) -> Result<(), ObsError> {
    let video = client.get_video_settings().await?;
    let transform = json!({
        "positionX": placement.left_pct * video.base_width,
        "positionY": placement.top_pct * video.base_height,
        "rotation": 0,
        "scaleX": 1.0,
        "scaleY": 1.0,
        "boundsType": "OBS_BOUNDS_STRETCH",
        "boundsWidth": placement.width_pct * video.base_width,
        "boundsHeight": placement.height_pct * video.base_height,
        "boundsAlignment": 0,
    });
    client
        .set_scene_item_transform(&placement.scene, item_id, transform)
        .await
}

/// Hide a source in a scene without removing it.
pub async fn hide_source(client: &ObsClient, scene: &str, source: &str) -> Result<(), ObsError> {
    let item_id = client.get_scene_item_id(scene, source).await?;
    client.set_scene_item_enabled(scene, item_id, false).await
}

/// Remove a source from OBS entirely (all scenes).
pub async fn remove_source(client: &ObsClient, source: &str) -> Result<(), ObsError> {
    client.remove_input(source).await
}
