//! Structured filters and sort orders applied after admission

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// How the final list is ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Keep the relevance order produced by admission
    #[default]
    Relevance,
    /// Cheapest first
    Price,
    /// Best rated first
    Rating,
    /// Most recently published first
    Newest,
}

/// User-selected structured filters. Every field is optional and
/// independent; unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    /// Exact, case-insensitive category label
    #[serde(default)]
    pub category: Option<String>,
    /// Inclusive `[min, max]` price bounds
    #[serde(default)]
    pub price_range: Option<(f64, f64)>,
    /// Minimum rating
    #[serde(default, rename = "rating")]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub in_stock_only: bool,
    #[serde(default)]
    pub sort_by: Option<SortMode>,
}

impl FilterSet {
    /// Whether `item` passes every configured filter
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if item.category.to_lowercase() != category.to_lowercase() {
                return false;
            }
        }

        if let Some((min, max)) = self.price_range {
            if item.price < min || item.price > max {
                return false;
            }
        }

        if let Some(floor) = self.min_rating {
            if item.rating < floor {
                return false;
            }
        }

        !self.in_stock_only || item.in_stock
    }

    /// Filter, then sort according to `sort_by`
    pub fn apply(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        let filtered: Vec<CatalogItem> = items.into_iter().filter(|i| self.matches(i)).collect();
        sort_items(filtered, self.sort_by.unwrap_or_default())
    }
}

/// Stable sort; `Relevance` leaves the incoming order untouched
pub fn sort_items(mut items: Vec<CatalogItem>, mode: SortMode) -> Vec<CatalogItem> {
    match mode {
        SortMode::Relevance => {}
        SortMode::Price => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::Rating => items.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        // None < Some(_), so undated items sink to the end
        SortMode::Newest => items.sort_by(|a, b| b.published_date.cmp(&a.published_date)),
    }
    items
}

/// [`FilterSet::apply`] as a free function
pub fn apply(items: Vec<CatalogItem>, filters: &FilterSet) -> Vec<CatalogItem> {
    filters.apply(items)
}
