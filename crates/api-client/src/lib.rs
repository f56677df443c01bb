//! Client for the Volkszaehler middleware API
//!
//! This crate talks to a Volkszaehler-style middleware serving entities,
//! historical data and consumption forecasts.
//!
//! # Features
//!
//! - **Endpoint discovery**: Accepts either the web root or the middleware
//!   script and checks which one answers
//! - **Automatic grouping**: Picks a time bucket from a target tuple count
//! - **Best-effort fetches**: Failures are logged and counted, callers get empty results
//! - **Injectable transport**: Swap the HTTP layer for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::{Duration, Utc};
//! use vz_api_client::{ClientConfig, DataQuery, VzClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default().with_base_url("http://raspberrypi/");
//!     let client = VzClient::with_config(config).await?;
//!
//!     for entity in client.entities().await {
//!         println!("{} {}", entity.uuid, entity.entity_type);
//!     }
//!
//!     let to = Utc::now();
//!     let query = DataQuery::new("8f8e1c3a", to - Duration::days(1), to).tuples(24);
//!     println!("Got {} tuples", client.data(&query).await.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod resolver;
pub mod transport;

pub use client::{FetchStats, VzClient};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use models::{Entity, Prognosis, Tuple};
pub use query::{infer_group, DataQuery, Group};
pub use resolver::resolve_endpoint;
pub use transport::{HttpTransport, RawResponse, Transport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::{FetchStats, VzClient};
    pub use crate::config::ClientConfig;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::models::{Entity, Prognosis, Tuple};
    pub use crate::query::{DataQuery, Group};
}
