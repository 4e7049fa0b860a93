//! Mute coordination for the configured auxiliary inputs.

use scenecast_obs::{ObsClient, ObsError};
use tracing::debug;

/// Set the mute state on each configured auxiliary source, sequentially and
/// in list order. Not transactional: a failure at item N leaves the first
/// N-1 mutations in place and aborts the rest.
pub async fn set_sources_muted(
    client: &ObsClient,
    sources: &[String],
    muted: bool,
) -> Result<(), ObsError> {
    for name in sources {
        debug!("setting mute={muted} on auxiliary input '{name}'");
        client.set_input_mute(name, muted).await?;
    }
    Ok(())
}
