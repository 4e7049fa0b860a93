//! obs-websocket v5 client used by the Scenecast gateway.
//!
//! Deliberately minimal: one persistent identified session, sequential
//! request/response calls, no event subscriptions and no reconnect loop.
//! The gateway re-dials lazily through [`ObsSession`] when the socket dies.

pub mod client;
pub mod error;
pub mod protocol;
pub mod requests;
pub mod session;

pub use client::ObsClient;
pub use error::ObsError;
pub use requests::media_action;
pub use session::{ObsConfig, ObsSession};
