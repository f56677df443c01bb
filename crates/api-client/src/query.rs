//! Time-windowed data queries
//!
//! Builds `/data/{uuid}.json` request paths, including the automatic group
//! selection used when the caller asks for a number of tuples instead of a
//! granularity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Time-aggregation granularity understood by the middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// Per minute
    Minute,
    /// Per hour
    Hour,
    /// Per day
    Day,
    /// Per week
    Week,
    /// Per month
    Month,
    /// Per year
    Year,
}

impl Group {
    /// Label used in the `group` query parameter
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown group: {other}")),
        }
    }
}

/// Pick the coarsest group strictly shorter than `period_secs`.
///
/// Thresholds are compared with `>`, so a period of exactly one hour yields
/// [`Group::Minute`]. Periods of a minute or less are not grouped.
#[must_use]
pub fn infer_group(period_secs: i64) -> Option<Group> {
    if period_secs > 365 * DAY {
        Some(Group::Year)
    } else if period_secs > 30 * DAY {
        Some(Group::Month)
    } else if period_secs > 7 * DAY {
        Some(Group::Week)
    } else if period_secs > DAY {
        Some(Group::Day)
    } else if period_secs > HOUR {
        Some(Group::Hour)
    } else if period_secs > MINUTE {
        Some(Group::Minute)
    } else {
        None
    }
}

/// Parameters of a data request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQuery {
    uuid: String,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    group: Option<String>,
    options: Option<String>,
    tuples: u32,
}

impl DataQuery {
    /// Query `uuid` between `from` and `to` without grouping
    pub fn new(uuid: impl Into<String>, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            uuid: uuid.into(),
            from,
            to,
            group: None,
            options: None,
            tuples: 0,
        }
    }

    /// Explicit group label. An empty label means no explicit group.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        let group = group.into();
        self.group = (!group.is_empty()).then_some(group);
        self
    }

    /// Raw `options` fragment, passed through verbatim
    #[must_use]
    pub fn options(mut self, options: impl Into<String>) -> Self {
        let options = options.into();
        self.options = (!options.is_empty()).then_some(options);
        self
    }

    /// Target number of tuples. Zero disables the parameter.
    #[must_use]
    pub fn tuples(mut self, tuples: u32) -> Self {
        self.tuples = tuples;
        self
    }

    /// Entity the query is for
    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Group that will be sent, explicit or inferred from the tuple count
    #[must_use]
    pub fn effective_group(&self) -> Option<String> {
        if self.group.is_some() {
            return self.group.clone();
        }

        if self.tuples == 0 {
            return None;
        }

        let period = (self.to.timestamp() - self.from.timestamp()) / i64::from(self.tuples);
        infer_group(period).map(|g| g.as_str().to_string())
    }

    /// Ordered query parameters
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("from", (self.from.timestamp() * 1000).to_string()),
            ("to", (self.to.timestamp() * 1000).to_string()),
        ];

        if self.tuples > 0 {
            params.push(("tuples", self.tuples.to_string()));
        }

        if let Some(group) = self.effective_group() {
            params.push(("group", group));
        }

        if let Some(ref options) = self.options {
            params.push(("options", options.clone()));
        }

        params
    }

    /// Request path relative to the API root
    #[must_use]
    pub fn path(&self) -> String {
        format!("/data/{}.json?{}", self.uuid, render_query(&self.params()))
    }
}

/// Render `key=value` pairs joined by `&`, values taken verbatim
pub(crate) fn render_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
