//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request could not be sent or the connection failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body is not valid JSON or does not match the envelope
    #[error("JSON decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Check if the request never produced a response
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Transport(_))
    }

    /// Check if the response body could not be decoded
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Check if the request hit the transport timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let transport = ApiError::transport("connection refused");
        assert!(transport.is_transport());
        assert!(!transport.is_decode());
        assert!(!transport.is_timeout());

        let decode: ApiError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(decode.is_decode());
        assert!(!decode.is_transport());

        assert!(!ApiError::config("bad").is_transport());
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");

        let err = ApiError::config("timeout cannot be zero");
        assert_eq!(
            err.to_string(),
            "Configuration error: timeout cannot be zero"
        );
    }
}
