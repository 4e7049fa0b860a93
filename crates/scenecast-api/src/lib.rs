use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use scenecast_core::AppState;
use serde_json::json;

pub mod error;
pub mod routes;

pub fn build_router() -> Router<AppState> {
    let cors = build_cors_layer();
    Router::new()
        .route("/health", get(health))
        // Playback
        .route("/obs/play", post(routes::playback::play))
        .route("/obs/stop", post(routes::playback::stop))
        // Audio
        .route("/obs/mute", post(routes::audio::mute))
        // Scenes
        .route("/obs/heartbeat", get(routes::status::heartbeat))
        .route("/obs/scene", post(routes::scenes::set_scene))
        .route("/obs/screenshot", get(routes::status::screenshot))
        // Stream output
        .route("/obs/stream/start", post(routes::stream::start))
        .route("/obs/stream/stop", post(routes::stream::stop))
        .route("/obs/status", get(routes::stream::status))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "scenecast" })),
    )
}

fn build_cors_layer() -> tower_http::cors::CorsLayer {
    // The gateway sits on a trusted LAN/localhost and is driven by overlay
    // tooling served from arbitrary origins, so any-origin is intentional.
    tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any)
}
