//! Lazy, single-flight management of the one control connection.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::info;

use crate::client::ObsClient;
use crate::error::ObsError;

#[derive(Debug, Clone)]
pub struct ObsConfig {
    pub url: String,
    pub password: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

/// Owns the process's single obs-websocket session.
///
/// The session is dialed on first use and reused afterwards. The mutex is
/// held across the dial, so concurrent first requests wait for one
/// connection attempt instead of racing to create duplicates. A session
/// whose socket has died is replaced the next time one is needed.
pub struct ObsSession {
    config: ObsConfig,
    client: Mutex<Option<Arc<ObsClient>>>,
}

impl ObsSession {
    pub fn new(config: ObsConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
        }
    }

    pub async fn ensure_connected(&self) -> Result<Arc<ObsClient>, ObsError> {
        let mut guard = self.client.lock().await;
        if let Some(client) = guard.as_ref() {
            if client.is_connected() {
                return Ok(client.clone());
            }
            info!("obs-websocket session is gone, reconnecting");
        }
        let client = Arc::new(
            ObsClient::connect(
                &self.config.url,
                &self.config.password,
                self.config.connect_timeout,
                self.config.request_timeout,
            )
            .await?,
        );
        *guard = Some(client.clone());
        Ok(client)
    }
}
