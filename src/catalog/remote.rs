//! Catalog fetched from the storefront's HTTP API

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::source::{CatalogSource, FetchError};
use super::types::{CatalogDocument, CatalogPage, CatalogRequest};
use crate::error::AppError;
use crate::http::{catalog_url, client_with_timeout, parse_base_url};

/// GETs a paginated JSON envelope (or a bare array) from a fixed endpoint
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: client_with_timeout(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch(&self, request: &CatalogRequest) -> Result<CatalogPage, FetchError> {
        let url = catalog_url(&self.base_url, request);
        debug!("Fetching catalog from {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Catalog endpoint answered {}", status);
            return Err(FetchError::Failed(format!(
                "catalog request failed with status {}",
                status
            )));
        }

        let body = response.text().await?;
        let doc: CatalogDocument = serde_json::from_str(&body)?;
        Ok(doc.into())
    }
}
