//! vz-cli - query a Volkszaehler middleware from the terminal
//!
//! Resolves the API root, then lists entities, fetches tuples or asks for a
//! consumption forecast.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use vz_api_client::{ClientConfig, VzClient};
use vz_telemetry::{LogFormat, TelemetryConfig};

mod commands;
mod config;
mod output;

use commands::{data, entities, health, prognosis, resolve};
use output::{Format, Status};

/// Query a Volkszaehler middleware
#[derive(Parser)]
#[command(name = "vz-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Middleware address, either the web root or the middleware.php URL
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Log every response body
    #[arg(long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: Format,

    /// Print collected request metrics as JSON when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which API root the address resolves to
    Resolve,

    /// Check whether the API answers
    Health,

    /// List entities
    Entities,

    /// Fetch tuples of an entity
    Data {
        /// Entity UUID
        uuid: String,

        /// Window start (RFC 3339), defaults to `--hours` before the end
        #[arg(long)]
        from: Option<DateTime<Utc>>,

        /// Window end (RFC 3339), defaults to now
        #[arg(long)]
        to: Option<DateTime<Utc>>,

        /// Window length when `--from` is not given
        #[arg(long, default_value = "24")]
        hours: i64,

        /// Explicit group (minute, hour, day, week, month, year)
        #[arg(short, long)]
        group: Option<String>,

        /// Raw options passed to the middleware
        #[arg(short, long)]
        options: Option<String>,

        /// Target number of tuples, infers a group when none is given
        #[arg(short = 'n', long, default_value = "0")]
        tuples: u32,
    },

    /// Fetch the consumption forecast of an entity
    Prognosis {
        /// Entity UUID
        uuid: String,

        /// Forecast period
        #[arg(short, long, default_value = "day")]
        period: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    if cli.format == Format::Json {
        telemetry.format = LogFormat::Json;
    }
    if let Err(e) = vz_telemetry::init_with_config(&telemetry) {
        Status::error(&e.to_string());
    }

    let result = run(&cli).await;

    if cli.metrics {
        if let Err(e) = output::print_json(&vz_telemetry::metrics().export_json()) {
            Status::error(&e.to_string());
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = config::merge(
        ClientConfig::from_env(),
        cli.url.as_deref(),
        cli.timeout,
        cli.debug,
    );
    let client = VzClient::with_config(config.clone()).await?;
    tracing::debug!(url = %client.base_url(), "Client ready");

    match &cli.command {
        Commands::Resolve => resolve::run(&client, &config, cli.format),
        Commands::Health => health::run(&client, cli.format).await,
        Commands::Entities => entities::run(&client, cli.format).await,
        Commands::Data {
            uuid,
            from,
            to,
            hours,
            group,
            options,
            tuples,
        } => {
            let window = data::Window::new(*from, *to, *hours)?;
            let query = data::build_query(uuid, &window, group.as_deref(), options.as_deref(), *tuples);
            data::run(&client, &query, cli.format).await
        }
        Commands::Prognosis { uuid, period } => {
            prognosis::run(&client, uuid, period, cli.format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_data_command() {
        let cli = Cli::try_parse_from([
            "vz-cli",
            "--url",
            "http://pi",
            "data",
            "abc",
            "--from",
            "2024-01-01T00:00:00Z",
            "-n",
            "10",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("http://pi"));
        assert_eq!(cli.format, Format::Json);
        match cli.command {
            Commands::Data {
                uuid, from, tuples, hours, ..
            } => {
                assert_eq!(uuid, "abc");
                assert_eq!(from.unwrap().timestamp(), 1_704_067_200);
                assert_eq!(tuples, 10);
                assert_eq!(hours, 24);
            }
            _ => panic!("expected data command"),
        }
    }

    #[test]
    fn test_parse_prognosis_default_period() {
        let cli = Cli::try_parse_from(["vz-cli", "prognosis", "abc"]).unwrap();
        match cli.command {
            Commands::Prognosis { period, .. } => assert_eq!(period, "day"),
            _ => panic!("expected prognosis command"),
        }
    }

    #[test]
    fn test_rejects_bad_timestamp() {
        assert!(Cli::try_parse_from(["vz-cli", "data", "abc", "--from", "yesterday"]).is_err());
    }
}
