//! Search Engine Integration
//!
//! Ties together query parsing, relevance scoring, admission and the
//! filter/sort stage into one synchronous pipeline over a fetched page.

use serde::Serialize;
use tracing::{debug, info};

use super::admission::AdmissionPolicy;
use super::filters::FilterSet;
use super::parser::{ParsedQuery, QueryParser};
use super::ranking::{RelevanceScorer, ScoredItem};
use crate::catalog::{CatalogItem, CatalogPage};
use crate::config::SearchConfig;

/// Outcome of one search
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResult {
    /// Ranked, filtered, sorted items
    pub items: Vec<CatalogItem>,
    /// Number of items in `items`
    pub total_count: usize,
    /// The catalog reported further pages
    pub has_more: bool,
    /// Fetch failure message, if the search failed
    pub error: Option<String>,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<CatalogItem>, has_more: bool) -> Self {
        Self {
            total_count: items.len(),
            items,
            has_more,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Search engine that combines parsing, scoring, admission and filtering
#[derive(Debug, Clone)]
pub struct SearchEngine {
    scorer: RelevanceScorer,
    admission: AdmissionPolicy,
    enable_fuzzy_match: bool,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Create a new search engine with default configuration
    pub fn new() -> Self {
        Self::from_config(&SearchConfig::default())
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            scorer: RelevanceScorer::new(config.weights.clone(), config.fuzzy_threshold),
            admission: config.admission(),
            enable_fuzzy_match: config.enable_fuzzy_match,
        }
    }

    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    /// Score every item; no item is dropped here
    pub fn score_all(&self, items: Vec<CatalogItem>, query: &ParsedQuery) -> Vec<ScoredItem> {
        items
            .into_iter()
            .map(|item| {
                let relevance = self.scorer.score(&item, query);
                ScoredItem {
                    item,
                    score: relevance.score,
                    max_similarity: relevance.max_similarity,
                }
            })
            .collect()
    }

    /// Score, admit and order by relevance.
    ///
    /// An empty query yields nothing regardless of the catalog.
    pub fn rank(&self, query: &str, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        let parsed = QueryParser::parse(query);
        if parsed.is_empty() {
            return Vec::new();
        }

        if !self.enable_fuzzy_match {
            return items;
        }

        let candidates = items.len();
        let scored = self.score_all(items, &parsed);
        let admitted = self.admission.admit(scored);
        debug!(
            "Admitted {} of {} items for '{}'",
            admitted.len(),
            candidates,
            parsed.whole_query
        );
        admitted
    }

    /// Full pipeline over a list of items
    pub fn search(&self, query: &str, items: Vec<CatalogItem>, filters: &FilterSet) -> Vec<CatalogItem> {
        filters.apply(self.rank(query, items))
    }

    /// Full pipeline over a fetched page, carrying its has-more flag
    pub fn run(&self, query: &str, page: CatalogPage, filters: &FilterSet) -> SearchResult {
        let has_more = page.has_more;
        let items = self.search(query, page.items, filters);
        info!("Search '{}' produced {} results", query.trim(), items.len());
        SearchResult::from_items(items, has_more)
    }
}
