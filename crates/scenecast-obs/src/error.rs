use thiserror::Error;

use crate::protocol::request_status;

#[derive(Debug, Error)]
pub enum ObsError {
    #[error("failed to connect to OBS at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[error("connecting to OBS at {url} timed out after {timeout_secs}s")]
    ConnectTimeout { url: String, timeout_secs: u64 },
    #[error("OBS rejected the identify handshake: {0}")]
    Handshake(String),
    #[error("OBS connection closed")]
    Closed,
    #[error("OBS request {request_type} timed out")]
    RequestTimeout { request_type: String },
    #[error("OBS request {request_type} failed (code {code}): {}", .comment.as_deref().unwrap_or("no details provided"))]
    Request {
        request_type: String,
        code: u16,
        comment: Option<String>,
    },
    #[error("malformed OBS message: {0}")]
    Protocol(String),
}

impl ObsError {
    /// True when the failure is the remote's "no such resource" rejection,
    /// e.g. looking up a scene item that does not exist in the scene.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ObsError::Request { code, .. } if *code == request_status::RESOURCE_NOT_FOUND
        )
    }
}
