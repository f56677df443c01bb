//! Endpoint discovery
//!
//! Users usually configure either the web root of a Volkszaehler install or
//! the middleware script itself. [`resolve_endpoint`] figures out which one
//! actually answers API calls.

use crate::transport::Transport;
use tracing::{debug, info};

/// Path segment of the middleware script, tried as a fallback API root
pub const MIDDLEWARE_SUFFIX: &str = "/middleware.php";

/// Resource requested to check whether a root serves the API
const CHECK_PATH: &str = "/entity.json";

/// Determine the API root for `base_address`.
///
/// Never fails. If no candidate answers, the normalized input is returned on
/// the assumption that the service comes up later.
pub async fn resolve_endpoint(transport: &dyn Transport, base_address: &str) -> String {
    let url = base_address.trim_end_matches('/');
    info!(url = %url, "Validating API endpoint");

    if answers(transport, url).await {
        info!(url = %url, "API endpoint validated");
        return url.to_string();
    }

    if url.ends_with(MIDDLEWARE_SUFFIX) {
        info!(url = %url, "API endpoint not responding, will keep retrying using configured url");
        return url.to_string();
    }

    let candidate = format!("{url}{MIDDLEWARE_SUFFIX}");
    info!(candidate = %candidate, "API endpoint not responding, trying middleware path");

    if answers(transport, &candidate).await {
        info!(url = %candidate, "API endpoint detected");
        return candidate;
    }

    info!(url = %url, "API endpoint still not responding, will keep retrying using configured url");
    url.to_string()
}

async fn answers(transport: &dyn Transport, root: &str) -> bool {
    let url = format!("{root}{CHECK_PATH}");
    match transport.get(&url).await {
        Ok(response) => {
            debug!(url = %url, status = response.status, "Root answered");
            response.is_ok()
        }
        Err(e) => {
            debug!(url = %url, error = %e, "Root check failed");
            false
        }
    }
}
