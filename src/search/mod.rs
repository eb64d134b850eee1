//! Fuzzy search and relevance ranking over a fetched catalog
//!
//! Pipeline: parse query → score every item → admit on two thresholds →
//! filter and sort. [`controller`] drives the pipeline with debouncing and
//! cancellation.

pub mod admission;
pub mod controller;
pub mod engine;
pub mod filters;
pub mod parser;
pub mod ranking;
pub mod similarity;

#[cfg(test)]
mod property_tests;

pub use admission::AdmissionPolicy;
pub use controller::{SearchController, SearchPhase, SearchSnapshot};
pub use engine::{SearchEngine, SearchResult};
pub use filters::{FilterSet, SortMode};
pub use parser::{ParsedQuery, QueryParser};
pub use ranking::{RelevanceScore, RelevanceScorer, ScoredItem, ScoringWeights};
