//! Catalog record types
//!
//! Items are deserialized leniently: the storefront backend omits or nulls
//! fields freely, and scoring treats anything missing as empty.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::search::filters::FilterSet;

/// One catalog entry (a book in the storefront)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCatalogItem")]
pub struct CatalogItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub review_count: u64,
    pub in_stock: bool,
    pub stock_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
}

/// Wire shape of a catalog entry.
///
/// Records may carry `_id`, `id` or both; `_id` wins when both are present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogItem {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    review_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    in_stock: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    stock_count: u32,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_date")]
    published_date: Option<NaiveDate>,
}

impl From<RawCatalogItem> for CatalogItem {
    fn from(raw: RawCatalogItem) -> Self {
        Self {
            id: raw.mongo_id.or(raw.id).unwrap_or_default(),
            title: raw.title,
            author: raw.author,
            description: raw.description,
            category: raw.category,
            price: raw.price,
            rating: raw.rating,
            review_count: raw.review_count,
            in_stock: raw.in_stock,
            stock_count: raw.stock_count,
            tags: raw.tags,
            published_date: raw.published_date,
        }
    }
}

impl CatalogItem {
    /// Tags, or an empty slice when the record carries none
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// What the controller asks the catalog for.
///
/// The query sent upstream is always empty and the page oversized: all
/// relevance filtering happens client-side. `filters` is a hint a source
/// may use to pre-filter, never something the pipeline relies on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRequest {
    pub query: String,
    pub limit: usize,
    pub filters: FilterSet,
}

/// A page of catalog items as reported by the source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub total: usize,
    pub has_more: bool,
}

/// Paginated envelope used by the storefront API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse {
    #[serde(default)]
    pub data: Vec<CatalogItem>,
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub has_more: bool,
}

/// A catalog document is either a bare array of items or a paginated envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogDocument {
    Items(Vec<CatalogItem>),
    Page(PaginatedResponse),
}

impl From<CatalogDocument> for CatalogPage {
    fn from(doc: CatalogDocument) -> Self {
        match doc {
            CatalogDocument::Items(items) => CatalogPage {
                total: items.len(),
                items,
                has_more: false,
            },
            CatalogDocument::Page(page) => CatalogPage {
                total: page.total.unwrap_or(page.data.len()),
                items: page.data,
                has_more: page.has_more,
            },
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; anything else is `None`
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
