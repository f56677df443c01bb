//! HTTP transport seam
//!
//! The client and the endpoint resolver only ever talk to the network through
//! [`Transport`]. Production code uses [`HttpTransport`]; tests inject their
//! own implementation.

use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

const CLIENT_USER_AGENT: &str = concat!("vz-api-client/", env!("CARGO_PKG_VERSION"));

/// Status and fully-read body of a GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, empty if it could not be read
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is exactly 200 OK
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Something that can perform a JSON GET request
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the status and full body.
    ///
    /// Fails only when no response was received at all. Non-2xx statuses are
    /// returned as regular responses.
    async fn get(&self, url: &str) -> ApiResult<RawResponse>;
}

/// `reqwest`-backed transport with a fixed per-request timeout
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Build a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let inner = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> ApiResult<RawResponse> {
        let response = self.inner.get(url).send().await?;
        let status = response.status().as_u16();

        // `bytes()` consumes the response, so the connection is released
        // whether or not the read succeeds.
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read response body");
                Vec::new()
            }
        };

        Ok(RawResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accept one connection on a local port, answer it with `response` and
    /// hand back the raw request head, lowercased.
    async fn serve_once(response: &'static [u8]) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/entity.json", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            socket.write_all(response).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_lowercase()
        });

        (url, server)
    }

    #[test]
    fn test_http_transport_creation() {
        assert!(HttpTransport::new(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_raw_response_is_ok() {
        let ok = RawResponse {
            status: 200,
            body: Vec::new(),
        };
        let created = RawResponse {
            status: 201,
            body: Vec::new(),
        };
        assert!(ok.is_ok());
        assert!(!created.is_ok());
    }

    #[tokio::test]
    async fn test_http_transport_sends_accept_and_keeps_error_status() {
        let (url, server) = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        )
        .await;
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();

        let response = transport.get(&url).await.unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.body, b"not found");

        let request = server.await.unwrap();
        assert!(request.starts_with("get /entity.json http/1.1"));
        assert!(request.contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_http_transport_truncated_body_is_empty() {
        let (url, server) = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{\"entities\"",
        )
        .await;
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();

        let response = transport.get(&url).await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_transport_connection_refused() {
        // Bind then drop, so nothing listens on the port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/entity.json", listener.local_addr().unwrap());
        drop(listener);

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        assert!(transport.get(&url).await.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport = MockTransport::new()
            .respond("http://vz/entity.json", 200, "{}")
            .fail("http://vz/down", "timed out");

        let ok = transport.get("http://vz/entity.json").await.unwrap();
        assert_eq!(ok.status, 200);
        assert_eq!(ok.body, b"{}");

        assert!(transport.get("http://vz/down").await.unwrap_err().is_transport());
        assert!(transport.get("http://vz/unknown").await.is_err());

        assert_eq!(
            transport.requests(),
            vec!["http://vz/entity.json", "http://vz/down", "http://vz/unknown"]
        );
    }
}
