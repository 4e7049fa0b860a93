//! Persistent obs-websocket connection with request/response correlation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ObsError;
use crate::protocol::{self, opcode};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;
type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<protocol::RequestResponse>>>>;

/// One identified obs-websocket session.
///
/// Outgoing frames go through an mpsc channel to a writer task so concurrent
/// handlers can issue calls without sharing the sink; a reader task routes
/// each RequestResponse back to its caller by request id.
#[derive(Debug)]
pub struct ObsClient {
    tx: mpsc::UnboundedSender<Message>,
    pending: PendingMap,
    connected: Arc<AtomicBool>,
    request_timeout: Duration,
}

impl ObsClient {
    /// Dial, complete the Hello/Identify handshake and start the IO tasks.
    /// The timeout covers the dial and the handshake together.
    pub async fn connect(
        url: &str,
        password: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ObsError> {
        let ws = tokio::time::timeout(connect_timeout, Self::establish(url, password))
            .await
            .map_err(|_| ObsError::ConnectTimeout {
                url: url.to_string(),
                timeout_secs: connect_timeout.as_secs(),
            })??;

        info!("identified obs-websocket session at {url}");

        let (write, read) = ws.split();
        let (tx, rx) = mpsc::unbounded_channel();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let connected = Arc::new(AtomicBool::new(true));

        tokio::spawn(Self::sender_task(write, rx));
        tokio::spawn(Self::receiver_task(read, pending.clone(), connected.clone()));

        Ok(Self {
            tx,
            pending,
            connected,
            request_timeout,
        })
    }

    async fn establish(url: &str, password: &str) -> Result<WsStream, ObsError> {
        let (mut ws, _) = connect_async(url).await.map_err(|e| ObsError::Connect {
            url: url.to_string(),
            source: e,
        })?;

        let hello = Self::read_handshake_frame(&mut ws, opcode::HELLO).await?;
        let hello: protocol::Hello = serde_json::from_value(hello)
            .map_err(|e| ObsError::Protocol(format!("invalid Hello payload: {e}")))?;

        let authentication = hello
            .authentication
            .as_ref()
            .map(|auth| protocol::auth_response(password, &auth.salt, &auth.challenge));
        let identify = protocol::Identify {
            rpc_version: protocol::RPC_VERSION,
            authentication,
            event_subscriptions: 0,
        };
        let frame = protocol::frame(opcode::IDENTIFY, &identify)
            .map_err(|e| ObsError::Protocol(e.to_string()))?;
        ws.send(Message::Text(frame.into()))
            .await
            .map_err(|e| ObsError::Handshake(e.to_string()))?;

        let identified = Self::read_handshake_frame(&mut ws, opcode::IDENTIFIED).await?;
        let identified: protocol::Identified = serde_json::from_value(identified)
            .map_err(|e| ObsError::Protocol(format!("invalid Identified payload: {e}")))?;
        debug!(
            "obs-websocket negotiated rpc version {}",
            identified.negotiated_rpc_version
        );

        Ok(ws)
    }

    /// Read frames until one with the wanted opcode arrives. A close frame
    /// here means the handshake was rejected (obs-websocket closes with
    /// 4008/4009 on bad authentication).
    async fn read_handshake_frame(ws: &mut WsStream, want: u8) -> Result<Value, ObsError> {
        while let Some(msg) = ws.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let envelope: protocol::RawEnvelope = serde_json::from_str(text.as_str())
                        .map_err(|e| ObsError::Protocol(format!("unparseable frame: {e}")))?;
                    if envelope.op == want {
                        return Ok(envelope.d);
                    }
                }
                Ok(Message::Close(frame)) => {
                    let reason = frame
                        .map(|f| format!("{} (close code {})", f.reason, f.code))
                        .unwrap_or_else(|| "connection closed".to_string());
                    return Err(ObsError::Handshake(reason));
                }
                Ok(_) => {}
                Err(e) => return Err(ObsError::Handshake(e.to_string())),
            }
        }
        Err(ObsError::Handshake(
            "socket closed before handshake completed".to_string(),
        ))
    }

    /// Issue one request and wait for its response.
    pub async fn call(
        &self,
        request_type: &str,
        request_data: Option<Value>,
    ) -> Result<Value, ObsError> {
        let request_id = Uuid::new_v4().to_string();
        let request = protocol::Request {
            request_type,
            request_id: &request_id,
            request_data: request_data.as_ref(),
        };
        let frame = protocol::frame(opcode::REQUEST, &request)
            .map_err(|e| ObsError::Protocol(e.to_string()))?;

        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending
            .lock()
            .await
            .insert(request_id.clone(), reply_tx);

        if self.tx.send(Message::Text(frame.into())).is_err() {
            self.pending.lock().await.remove(&request_id);
            return Err(ObsError::Closed);
        }

        let response = match tokio::time::timeout(self.request_timeout, reply_rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(_)) => return Err(ObsError::Closed),
            Err(_) => {
                self.pending.lock().await.remove(&request_id);
                return Err(ObsError::RequestTimeout {
                    request_type: request_type.to_string(),
                });
            }
        };

        if response.request_status.result {
            Ok(response.response_data.unwrap_or(Value::Null))
        } else {
            Err(ObsError::Request {
                request_type: response.request_type,
                code: response.request_status.code,
                comment: response.request_status.comment,
            })
        }
    }

    /// False once the reader task has observed the socket closing.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn sender_task(
        mut write: SplitSink<WsStream, Message>,
        mut rx: mpsc::UnboundedReceiver<Message>,
    ) {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = write.send(msg).await {
                debug!("obs-websocket send failed: {e}");
                break;
            }
        }
    }

    async fn receiver_task(
        mut read: SplitStream<WsStream>,
        pending: PendingMap,
        connected: Arc<AtomicBool>,
    ) {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => Self::route_frame(text.as_str(), &pending).await,
                Ok(Message::Close(_)) => {
                    info!("obs-websocket connection closed by remote");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("obs-websocket read error: {e}");
                    break;
                }
            }
        }
        connected.store(false, Ordering::SeqCst);
        // Dropping the reply senders fails every in-flight call with Closed.
        pending.lock().await.clear();
    }

    async fn route_frame(text: &str, pending: &PendingMap) {
        let envelope: protocol::RawEnvelope = match serde_json::from_str(text) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("dropping unparseable obs-websocket frame: {e}");
                return;
            }
        };
        match envelope.op {
            opcode::REQUEST_RESPONSE => {
                let response: protocol::RequestResponse = match serde_json::from_value(envelope.d)
                {
                    Ok(response) => response,
                    Err(e) => {
                        warn!("dropping malformed RequestResponse: {e}");
                        return;
                    }
                };
                if let Some(reply) = pending.lock().await.remove(&response.request_id) {
                    let _ = reply.send(response);
                } else {
                    debug!(
                        "response for unknown request id {} (timed out?)",
                        response.request_id
                    );
                }
            }
            // Not subscribed to events, but obs may still flush some.
            opcode::EVENT => {}
            other => debug!("ignoring obs-websocket frame with op {other}"),
        }
    }
}
