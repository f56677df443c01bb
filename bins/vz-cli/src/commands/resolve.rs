//! Resolve command - show the discovered API root

use crate::output::{print_json, Format, Status};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use vz_api_client::{ClientConfig, VzClient};

#[derive(Debug, Serialize)]
struct JsonResolveOutput<'a> {
    configured: &'a str,
    resolved: &'a str,
}

/// Print the configured address next to the root it resolved to
pub fn run(client: &VzClient, config: &ClientConfig, format: Format) -> Result<()> {
    if format == Format::Json {
        return print_json(&JsonResolveOutput {
            configured: &config.base_url,
            resolved: client.base_url(),
        });
    }

    Status::header("API endpoint");
    println!("  {:<12} {}", "Configured:".dimmed(), config.base_url);
    println!("  {:<12} {}", "Resolved:".dimmed(), client.base_url().green());

    Ok(())
}
