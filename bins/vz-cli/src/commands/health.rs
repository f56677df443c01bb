//! Health command - non-fatal liveness check

use crate::output::{print_json, Format, Status};
use anyhow::Result;
use serde::Serialize;
use std::time::Instant;
use vz_api_client::VzClient;

#[derive(Debug, Serialize)]
struct JsonHealthOutput<'a> {
    url: &'a str,
    healthy: bool,
    response_time_ms: u128,
}

/// Check the API root, failing the command when it does not answer
pub async fn run(client: &VzClient, format: Format) -> Result<()> {
    let start = Instant::now();
    let healthy = client.health().await;
    let elapsed = start.elapsed();

    if format == Format::Json {
        print_json(&JsonHealthOutput {
            url: client.base_url(),
            healthy,
            response_time_ms: elapsed.as_millis(),
        })?;
    } else if healthy {
        Status::success(&format!(
            "{} is up ({}ms)",
            client.base_url(),
            elapsed.as_millis()
        ));
    }

    if !healthy {
        anyhow::bail!("{} is not responding", client.base_url());
    }

    Ok(())
}
