#![allow(dead_code)]

pub mod mock_obs;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use scenecast_core::{AppConfig, AppState};
use scenecast_obs::{ObsConfig, ObsSession};

pub fn test_state(obs_url: String, mute_sources: Vec<String>) -> AppState {
    AppState {
        config: AppConfig {
            default_scene: "Scene 1".to_string(),
            default_layer: 1,
            mute_sources,
        },
        obs: Arc::new(ObsSession::new(ObsConfig {
            url: obs_url,
            password: String::new(),
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(2),
        })),
    }
}

pub fn test_app(state: AppState) -> Router {
    scenecast_api::build_router().with_state(state)
}

pub async fn request_json(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
