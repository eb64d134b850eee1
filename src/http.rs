//! HTTP client utilities
//!
//! reqwest picks up HTTP_PROXY / HTTPS_PROXY / NO_PROXY from the environment
//! on its own, so only timeouts and the user agent are configured here.

use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::catalog::CatalogRequest;
use crate::error::AppError;

/// Build a reqwest Client with the given timeout
pub fn client_with_timeout(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("shelfsearch/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Parse and sanity-check a catalog endpoint
pub fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::InvalidInput(format!("Invalid catalog URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::InvalidInput(format!(
            "Unsupported catalog URL scheme: {}",
            other
        ))),
    }
}

/// Append the catalog request as query parameters.
///
/// Existing parameters on the base URL are preserved.
pub fn catalog_url(base: &Url, request: &CatalogRequest) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", &request.query);
        if request.limit > 0 {
            pairs.append_pair("limit", &request.limit.to_string());
            pairs.append_pair("size", &request.limit.to_string());
        }
        if let Some(category) = &request.filters.category {
            pairs.append_pair("category", category);
        }
    }
    url
}
