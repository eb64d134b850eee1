//! Catalog sources
//!
//! The search pipeline only sees the [`CatalogSource`] trait; the storefront
//! decides where items come from.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::types::{CatalogDocument, CatalogItem, CatalogPage, CatalogRequest};
use crate::error::AppError;

/// Outcome of a failed catalog fetch
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Backend or transport failure; the message is shown to the user as-is
    #[error("{0}")]
    Failed(String),
    /// The request was superseded; never surfaced
    #[error("catalog request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Failed(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Failed(format!("invalid catalog response: {}", err))
    }
}

/// Something that can hand the search pipeline a page of catalog items
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, request: &CatalogRequest) -> Result<CatalogPage, FetchError>;
}

/// In-memory catalog, typically loaded from a JSON file
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<CatalogItem>,
}

impl StaticCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Parse a bare item array or a paginated envelope
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        let page = CatalogPage::from(doc);
        Ok(Self::new(page.items))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            AppError::CatalogLoadFailed(format!("{}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&data)?;
        debug!("Loaded {} catalog items from {}", catalog.items.len(), path.display());
        Ok(catalog)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch(&self, request: &CatalogRequest) -> Result<CatalogPage, FetchError> {
        let limit = if request.limit == 0 {
            self.items.len()
        } else {
            request.limit
        };

        Ok(CatalogPage {
            items: self.items.iter().take(limit).cloned().collect(),
            total: self.items.len(),
            has_more: self.items.len() > limit,
        })
    }
}
