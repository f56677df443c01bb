//! Response models of the middleware API
//!
//! The field sets are owned by the remote service. Only the attributes the
//! client relies on are typed; everything else is kept in `extra`.

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A channel, group or other monitored entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity identifier used in data and prognosis paths
    pub uuid: String,
    /// Entity type, e.g. `power` or `group`
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Nested entities of a group
    #[serde(default)]
    pub children: Vec<Entity>,
    /// Any other attribute returned by the API
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A single time-series sample
///
/// The API encodes tuples as arrays: `[timestamp_ms, value, count]`. The count
/// is optional and trailing items are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tuple {
    /// Sample timestamp in milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Sample value
    pub value: f64,
    /// Number of raw readings aggregated into this sample
    pub count: Option<u64>,
}

impl<'de> Deserialize<'de> for Tuple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TupleVisitor;

        impl<'de> Visitor<'de> for TupleVisitor {
            type Value = Tuple;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array [timestamp, value, count?]")
            }

            #[allow(clippy::cast_possible_truncation)]
            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Tuple, A::Error> {
                let timestamp: f64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let value: f64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let count: Option<u64> = seq.next_element::<Option<u64>>()?.flatten();

                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(Tuple {
                    timestamp: timestamp as i64,
                    value,
                    count,
                })
            }
        }

        deserializer.deserialize_seq(TupleVisitor)
    }
}

/// Consumption forecast for an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prognosis {
    /// Predicted consumption for the requested period
    #[serde(default)]
    pub consumption: f64,
    /// Ratio between the prognosis and the previous period
    #[serde(default)]
    pub factor: f64,
    /// Any other attribute returned by the API
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// `{"entities": [...]}`
#[derive(Debug, Default, Deserialize)]
pub struct EntityList {
    /// Listed entities
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// `{"data": {...}}`
#[derive(Debug, Default, Deserialize)]
pub struct DataEnvelope {
    /// Wrapped series
    #[serde(default)]
    pub data: DataSeries,
}

/// Series body of a data response
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    /// Entity the series belongs to
    #[serde(default)]
    pub uuid: Option<String>,
    /// Start of the returned window, milliseconds
    #[serde(default)]
    pub from: Option<f64>,
    /// End of the returned window, milliseconds
    #[serde(default)]
    pub to: Option<f64>,
    /// Number of raw rows the tuples were aggregated from
    #[serde(default)]
    pub rows: Option<u64>,
    /// Samples
    #[serde(default)]
    pub tuples: Vec<Tuple>,
}

/// `{"prognosis": {...}}`
#[derive(Debug, Default, Deserialize)]
pub struct PrognosisEnvelope {
    /// Wrapped forecast
    #[serde(default)]
    pub prognosis: Prognosis,
}
