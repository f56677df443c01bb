//! Prognosis command

use super::ensure_fetched;
use crate::output::{print_json, Format, Status};
use anyhow::Result;
use owo_colors::OwoColorize;
use vz_api_client::VzClient;

/// Print the consumption forecast of `uuid` for `period`
pub async fn run(client: &VzClient, uuid: &str, period: &str, format: Format) -> Result<()> {
    let prognosis = client.prognosis(uuid, period).await;
    ensure_fetched(client, "prognosis")?;

    if format == Format::Json {
        return print_json(&prognosis);
    }

    Status::header(&format!("Prognosis for {uuid} ({period})"));
    println!("  {:<13} {:.3}", "Consumption:".dimmed(), prognosis.consumption);
    println!("  {:<13} {:.3}", "Factor:".dimmed(), prognosis.factor);

    Ok(())
}
