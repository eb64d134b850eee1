//! Catalog collaborators: item records and the sources that fetch them

pub mod remote;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod sample;

pub use remote::HttpCatalog;
pub use source::{CatalogSource, FetchError, StaticCatalog};
pub use types::{CatalogItem, CatalogPage, CatalogRequest};
