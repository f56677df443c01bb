//! CLI command implementations

pub mod data;
pub mod entities;
pub mod health;
pub mod prognosis;
pub mod resolve;

use vz_api_client::VzClient;

/// Turn failures swallowed by the client into a command error
pub(crate) fn ensure_fetched(client: &VzClient, what: &str) -> anyhow::Result<()> {
    let stats = client.stats();
    if stats.total() > 0 {
        anyhow::bail!(
            "failed to fetch {what} from {} ({} transport, {} decode failures)",
            client.base_url(),
            stats.transport_failures,
            stats.decode_failures
        );
    }
    Ok(())
}
