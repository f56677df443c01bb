//! Data command - fetch tuples for a time window

use super::ensure_fetched;
use crate::output::{format_timestamp, print_json, Format, Status};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use vz_api_client::{DataQuery, VzClient};

/// Requested time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Window {
    /// Window ending at `to` (default now), starting at `from` or `hours` earlier
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>, hours: i64) -> Result<Self> {
        let to = to.unwrap_or_else(Utc::now);
        let from = match from {
            Some(from) => from,
            None => {
                Duration::try_hours(hours)
                    .and_then(|span| to.checked_sub_signed(span))
                    .ok_or_else(|| anyhow::anyhow!("--hours {hours} is out of range"))?
            }
        };

        if from >= to {
            anyhow::bail!("window start {from} is not before its end {to}");
        }

        Ok(Self { from, to })
    }
}

/// Build the data query for the command-line arguments
pub fn build_query(
    uuid: &str,
    window: &Window,
    group: Option<&str>,
    options: Option<&str>,
    tuples: u32,
) -> DataQuery {
    let mut query = DataQuery::new(uuid, window.from, window.to).tuples(tuples);
    if let Some(group) = group {
        query = query.group(group);
    }
    if let Some(options) = options {
        query = query.options(options);
    }
    query
}

/// Fetch and print the tuples for `query`
pub async fn run(client: &VzClient, query: &DataQuery, format: Format) -> Result<()> {
    let tuples = client.data(query).await;
    ensure_fetched(client, "data")?;

    if format == Format::Json {
        return print_json(&tuples);
    }

    let group = query.effective_group().unwrap_or_else(|| "none".to_string());
    Status::header(&format!("{} ({} tuples, group {group})", query.uuid(), tuples.len()));

    for tuple in &tuples {
        let count = tuple.count.map_or_else(String::new, |c| c.to_string());
        println!(
            "  {:<26} {:>14.3} {}",
            format_timestamp(tuple.timestamp),
            tuple.value,
            count.dimmed()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_window_defaults_to_hours_before_end() {
        let window = Window::new(None, Some(noon()), 6).unwrap();
        assert_eq!(window.to, noon());
        assert_eq!(window.from, Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_window_rejects_reversed_range() {
        assert!(Window::new(Some(noon()), Some(noon()), 24).is_err());
        assert!(Window::new(None, Some(noon()), -1).is_err());
    }

    #[test]
    fn test_window_rejects_hours_beyond_date_range() {
        let err = Window::new(None, Some(noon()), 1_000_000_000_000).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(Window::new(None, None, i64::MAX).is_err());
    }

    #[test]
    fn test_build_query() {
        let window = Window::new(None, Some(noon()), 10).unwrap();

        let inferred = build_query("abc", &window, None, Some("exact"), 10);
        assert!(inferred.path().ends_with("&tuples=10&group=minute&options=exact"));

        let explicit = build_query("abc", &window, Some("day"), None, 0);
        assert!(explicit.path().ends_with("&group=day"));
    }
}
