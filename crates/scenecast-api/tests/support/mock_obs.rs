//! Scripted obs-websocket v5 server for gateway tests.
//!
//! Speaks the Hello/Identify handshake (no auth), records every request it
//! receives, and answers from a tiny in-memory scene model so tests can
//! assert exact call sequences. Runs on a random port; individual request
//! types can be scripted to fail.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;

pub struct MockObs {
    addr: SocketAddr,
    state: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    connections: AtomicUsize,
    requests: Mutex<Vec<(String, Value)>>,
    /// (scene, source) -> scene item id
    sources: Mutex<HashMap<(String, String), i64>>,
    current_scene: Mutex<String>,
    streaming: AtomicBool,
    /// request type -> scripted (code, comment) failure
    fail: Mutex<HashMap<String, (u16, String)>>,
    next_item_id: AtomicI64,
}

impl MockObs {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(MockState {
            current_scene: Mutex::new("Scene 1".to_string()),
            next_item_id: AtomicI64::new(1),
            ..Default::default()
        });

        let accept_state = state.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                accept_state.connections.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve_connection(stream, accept_state.clone()));
            }
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Number of websocket connections the gateway has dialed.
    pub fn connections(&self) -> usize {
        self.state.connections.load(Ordering::SeqCst)
    }

    pub async fn recorded(&self) -> Vec<(String, Value)> {
        self.state.requests.lock().await.clone()
    }

    pub async fn recorded_types(&self) -> Vec<String> {
        self.state
            .requests
            .lock()
            .await
            .iter()
            .map(|(ty, _)| ty.clone())
            .collect()
    }

    pub async fn count_of(&self, request_type: &str) -> usize {
        self.state
            .requests
            .lock()
            .await
            .iter()
            .filter(|(ty, _)| ty == request_type)
            .count()
    }

    /// Seed a source as already present in a scene.
    pub async fn add_source(&self, scene: &str, source: &str) {
        let id = self.state.next_item_id.fetch_add(1, Ordering::SeqCst);
        self.state
            .sources
            .lock()
            .await
            .insert((scene.to_string(), source.to_string()), id);
    }

    pub async fn has_source(&self, scene: &str, source: &str) -> bool {
        self.state
            .sources
            .lock()
            .await
            .contains_key(&(scene.to_string(), source.to_string()))
    }

    /// How many scenes hold a source with this name.
    pub async fn source_count(&self, source: &str) -> usize {
        self.state
            .sources
            .lock()
            .await
            .keys()
            .filter(|(_, name)| name.as_str() == source)
            .count()
    }

    pub async fn current_scene(&self) -> String {
        self.state.current_scene.lock().await.clone()
    }

    /// Make every subsequent request of this type fail with the given
    /// status code and comment.
    pub async fn fail_request(&self, request_type: &str, code: u16, comment: &str) {
        self.state
            .fail
            .lock()
            .await
            .insert(request_type.to_string(), (code, comment.to_string()));
    }
}

async fn serve_connection(stream: TcpStream, state: Arc<MockState>) {
    let mut ws = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(_) => return,
    };

    let hello = json!({ "op": 0, "d": { "obsWebSocketVersion": "5.4.2", "rpcVersion": 1 } });
    if ws
        .send(Message::Text(hello.to_string().into()))
        .await
        .is_err()
    {
        return;
    }

    // Wait for Identify.
    loop {
        let Some(Ok(msg)) = ws.next().await else {
            return;
        };
        let Message::Text(text) = msg else { continue };
        let Ok(frame) = serde_json::from_str::<Value>(text.as_str()) else {
            return;
        };
        if frame["op"] == 1 {
            let identified = json!({ "op": 2, "d": { "negotiatedRpcVersion": 1 } });
            if ws
                .send(Message::Text(identified.to_string().into()))
                .await
                .is_err()
            {
                return;
            }
            break;
        }
    }

    // Request loop.
    while let Some(Ok(msg)) = ws.next().await {
        let Message::Text(text) = msg else { continue };
        let Ok(frame) = serde_json::from_str::<Value>(text.as_str()) else {
            continue;
        };
        if frame["op"] != 6 {
            continue;
        }
        let d = &frame["d"];
        let request_type = d["requestType"].as_str().unwrap_or_default().to_string();
        let request_id = d["requestId"].as_str().unwrap_or_default().to_string();
        let data = d.get("requestData").cloned().unwrap_or(Value::Null);

        state
            .requests
            .lock()
            .await
            .push((request_type.clone(), data.clone()));

        let (status, response_data) = respond(&state, &request_type, &data).await;
        let mut out = json!({
            "requestType": request_type,
            "requestId": request_id,
            "requestStatus": status,
        });
        if let Some(response_data) = response_data {
            out["responseData"] = response_data;
        }
        let reply = json!({ "op": 7, "d": out });
        if ws
            .send(Message::Text(reply.to_string().into()))
            .await
            .is_err()
        {
            break;
        }
    }
}

async fn respond(state: &MockState, request_type: &str, data: &Value) -> (Value, Option<Value>) {
    if let Some((code, comment)) = state.fail.lock().await.get(request_type).cloned() {
        return (
            json!({ "result": false, "code": code, "comment": comment }),
            None,
        );
    }

    let ok = json!({ "result": true, "code": 100 });
    match request_type {
        "GetSceneItemId" => {
            let scene = data["sceneName"].as_str().unwrap_or_default().to_string();
            let source = data["sourceName"].as_str().unwrap_or_default().to_string();
            match state.sources.lock().await.get(&(scene, source)) {
                Some(id) => (ok, Some(json!({ "sceneItemId": id }))),
                None => (
                    json!({
                        "result": false,
                        "code": 600,
                        "comment": "No scene items were found in the specified scene by that name or offset.",
                    }),
                    None,
                ),
            }
        }
        "CreateInput" => {
            let scene = data["sceneName"].as_str().unwrap_or_default().to_string();
            let source = data["inputName"].as_str().unwrap_or_default().to_string();
            let id = state.next_item_id.fetch_add(1, Ordering::SeqCst);
            state.sources.lock().await.insert((scene, source), id);
            (ok, Some(json!({ "sceneItemId": id })))
        }
        "RemoveInput" => {
            let source = data["inputName"].as_str().unwrap_or_default().to_string();
            state
                .sources
                .lock()
                .await
                .retain(|(_, name), _| name != &source);
            (ok, None)
        }
        "GetVideoSettings" => (
            ok,
            Some(json!({
                "baseWidth": 1920,
                "baseHeight": 1080,
                "outputWidth": 1920,
                "outputHeight": 1080,
                "fpsNumerator": 60,
                "fpsDenominator": 1,
            })),
        ),
        "GetCurrentProgramScene" => {
            let scene = state.current_scene.lock().await.clone();
            (ok, Some(json!({ "currentProgramSceneName": scene })))
        }
        "SetCurrentProgramScene" => {
            let scene = data["sceneName"].as_str().unwrap_or_default().to_string();
            *state.current_scene.lock().await = scene;
            (ok, None)
        }
        "GetStreamStatus" => (
            ok,
            Some(json!({ "outputActive": state.streaming.load(Ordering::SeqCst) })),
        ),
        "StartStream" => {
            state.streaming.store(true, Ordering::SeqCst);
            (ok, None)
        }
        "StopStream" => {
            state.streaming.store(false, Ordering::SeqCst);
            (ok, None)
        }
        "GetSourceScreenshot" => (
            ok,
            Some(json!({ "imageData": "data:image/png;base64,dGVzdA==" })),
        ),
        // SetInputSettings, SetSceneItemEnabled, SetSceneItemIndex,
        // SetSceneItemTransform, SetInputMute, TriggerMediaInputAction
        _ => (ok, None),
    }
}
