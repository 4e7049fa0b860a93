pub mod audio;
pub mod placement;
pub mod presence;

use std::sync::Arc;

use scenecast_obs::ObsSession;

pub use placement::{Placement, PlacementRequest};

/// Shared per-request context: immutable config plus the one OBS session.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub obs: Arc<ObsSession>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Scene used when a request names none.
    pub default_scene: String,
    /// Stacking index used when a play request names none.
    pub default_layer: i64,
    /// Inputs muted while gateway-driven playback is running.
    pub mute_sources: Vec<String>,
}
