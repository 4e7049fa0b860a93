//! Where and how large a media source sits in a scene.

use crate::AppConfig;

/// Optional placement fields as they arrive in a play request.
#[derive(Debug, Clone, Default)]
pub struct PlacementRequest {
    pub scene: Option<String>,
    pub layer: Option<i64>,
    pub width_pct: Option<f64>,
    pub height_pct: Option<f64>,
    pub left_pct: Option<f64>,
    pub top_pct: Option<f64>,
}

/// A fully resolved placement. Position and size are proportions of the
/// canvas; (0, 0, 1, 1) is the full frame anchored at the origin.
#[derive(Debug, Clone)]
pub struct Placement {
    pub scene: String,
    pub source: String,
    pub file: String,
    pub layer: Option<i64>,
    pub width_pct: f64,
    pub height_pct: f64,
    pub left_pct: f64,
    pub top_pct: f64,
}

impl Placement {
    /// Substitute config defaults for everything the request left unset.
    /// Done once at request-parse time; nothing downstream sees an Option
    /// except `layer`, whose absence means "leave stacking order alone".
    pub fn resolve(
        source: String,
        file: String,
        request: PlacementRequest,
        config: &AppConfig,
    ) -> Self {
        Self {
            scene: request
                .scene
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| config.default_scene.clone()),
            source,
            file,
            layer: Some(request.layer.unwrap_or(config.default_layer)),
            width_pct: request.width_pct.unwrap_or(1.0),
            height_pct: request.height_pct.unwrap_or(1.0),
            left_pct: request.left_pct.unwrap_or(0.0),
            top_pct: request.top_pct.unwrap_or(0.0),
        }
    }
}
