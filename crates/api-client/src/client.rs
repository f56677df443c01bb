//! Main API client implementation

use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::models::{DataEnvelope, Entity, EntityList, Prognosis, PrognosisEnvelope, Tuple};
use crate::query::{render_query, DataQuery};
use crate::resolver::resolve_endpoint;
use crate::transport::{HttpTransport, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use vz_telemetry::{metrics, Timer};

/// Entity listing path, also used for liveness checks
const ENTITIES_PATH: &str = "/entity.json";

/// Middleware API client
///
/// The API root is resolved once on construction and used verbatim for every
/// request afterwards. Fetch operations never fail: transport and decode
/// errors are logged, counted in [`FetchStats`] and turned into empty results.
/// Use the `try_*` variants to get at the error itself.
#[derive(Clone)]
pub struct VzClient {
    base_url: Arc<str>,
    transport: Arc<dyn Transport>,
    debug: bool,
    failures: Arc<FailureCounters>,
}

#[derive(Debug, Default)]
struct FailureCounters {
    transport: AtomicU64,
    decode: AtomicU64,
}

/// Failures swallowed by the fetch operations of one client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    /// Requests that got no response
    pub transport_failures: u64,
    /// Responses whose body could not be decoded
    pub decode_failures: u64,
}

impl FetchStats {
    /// Total number of swallowed failures
    #[must_use]
    pub fn total(&self) -> u64 {
        self.transport_failures + self.decode_failures
    }
}

impl VzClient {
    /// Create a client configured from the environment
    pub async fn new() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()).await
    }

    /// Create a client over HTTP, resolving the API root first
    pub async fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(&config, Arc::new(transport)).await)
    }

    /// Create a client over an existing transport, resolving the API root first
    pub async fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let base_url = resolve_endpoint(transport.as_ref(), &config.base_url).await;

        Self {
            base_url: base_url.into(),
            transport,
            debug: config.debug,
            failures: Arc::default(),
        }
    }

    /// Resolved API root
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether response bodies are logged
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Failures swallowed so far by this client and its clones
    #[must_use]
    pub fn stats(&self) -> FetchStats {
        FetchStats {
            transport_failures: self.failures.transport.load(Ordering::Relaxed),
            decode_failures: self.failures.decode.load(Ordering::Relaxed),
        }
    }

    // -------------------------------------------------------------------------
    // Raw access
    // -------------------------------------------------------------------------

    /// GET `path` below the API root and return the body, whatever the status
    #[instrument(skip(self))]
    pub async fn get(&self, path: &str) -> ApiResult<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);

        let timer = Timer::start("vz.http.get_ms");
        let result = self.transport.get(&url).await;
        let elapsed = timer.stop();

        let response = result.inspect_err(|e| {
            warn!(url = %url, error = %e, "GET failed");
        })?;

        info!(
            url = %url,
            status = response.status,
            elapsed_ms = elapsed.as_millis(),
            "GET {} ({}ms)",
            url,
            elapsed.as_millis()
        );

        if self.debug {
            info!(url = %url, body = %String::from_utf8_lossy(&response.body), "Response body");
        }

        Ok(response.body)
    }

    /// Check whether the API root currently answers with 200 OK
    pub async fn health(&self) -> bool {
        let url = format!("{}{}", self.base_url, ENTITIES_PATH);
        match self.transport.get(&url).await {
            Ok(response) => {
                debug!(url = %url, status = response.status, "Health check answered");
                response.is_ok()
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Health check failed");
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Typed fetches
    // -------------------------------------------------------------------------

    /// List all entities
    pub async fn try_entities(&self) -> ApiResult<Vec<Entity>> {
        let list: EntityList = self.get_json(ENTITIES_PATH).await?;
        Ok(list.entities)
    }

    /// List all entities, empty on failure
    pub async fn entities(&self) -> Vec<Entity> {
        let result = self.try_entities().await;
        self.settle("entities", result)
    }

    /// Fetch the tuples matching `query`
    pub async fn try_data(&self, query: &DataQuery) -> ApiResult<Vec<Tuple>> {
        let envelope: DataEnvelope = self.get_json(&query.path()).await?;
        Ok(envelope.data.tuples)
    }

    /// Fetch the tuples matching `query`, empty on failure
    pub async fn data(&self, query: &DataQuery) -> Vec<Tuple> {
        let result = self.try_data(query).await;
        self.settle("data", result)
    }

    /// Fetch the consumption forecast of `uuid` for `period` (e.g. `day`)
    pub async fn try_prognosis(&self, uuid: &str, period: &str) -> ApiResult<Prognosis> {
        let path = format!(
            "/prognosis/{uuid}.json?{}",
            render_query(&[("period", period.to_string())])
        );
        let envelope: PrognosisEnvelope = self.get_json(&path).await?;
        Ok(envelope.prognosis)
    }

    /// Fetch the consumption forecast, zero record on failure
    pub async fn prognosis(&self, uuid: &str, period: &str) -> Prognosis {
        let result = self.try_prognosis(uuid, period).await;
        self.settle("prognosis", result)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.get(path).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Collapse a failed fetch into its empty value, keeping count of it
    fn settle<T: Default>(&self, operation: &'static str, result: ApiResult<T>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                if e.is_decode() {
                    self.failures.decode.fetch_add(1, Ordering::Relaxed);
                    metrics().increment("vz.fetch.decode_failures");
                    warn!(operation, error = %e, "json decode failed");
                } else {
                    self.failures.transport.fetch_add(1, Ordering::Relaxed);
                    metrics().increment("vz.fetch.transport_failures");
                    warn!(operation, error = %e, "request failed");
                }
                T::default()
            }
        }
    }
}
