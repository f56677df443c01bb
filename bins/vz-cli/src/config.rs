//! Client configuration for the CLI
//!
//! Flags override the `VZ_*` environment handled by `vz-api-client`.

use std::time::Duration;
use vz_api_client::ClientConfig;

/// Merge command-line overrides into `base`
#[must_use]
pub fn merge(base: ClientConfig, url: Option<&str>, timeout_secs: Option<u64>, debug: bool) -> ClientConfig {
    let mut config = base;

    if let Some(url) = url {
        config = config.with_base_url(url);
    }

    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    if debug {
        config = config.with_debug(true);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_keeps_base() {
        let base = ClientConfig::default().with_base_url("http://from-env");
        assert_eq!(merge(base.clone(), None, None, false), base);
    }

    #[test]
    fn test_overrides_applied() {
        let config = merge(ClientConfig::default(), Some("http://pi/"), Some(3), true);
        assert_eq!(config.base_url, "http://pi/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.debug);
    }

    #[test]
    fn test_debug_flag_does_not_clear_env_debug() {
        let base = ClientConfig::default().with_debug(true);
        assert!(merge(base, None, None, false).debug);
    }
}
