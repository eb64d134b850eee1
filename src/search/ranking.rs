//! Ranking & Scoring System
//!
//! Scores a catalog item against a query from three signal families:
//! direct substring containment, prefix bonuses, and word-level fuzzy
//! matches. A small popularity bonus is added to items that already scored.

use serde::{Deserialize, Serialize};

use super::parser::{field_words, ParsedQuery, QueryParser};
use super::similarity::similarity;
use crate::catalog::CatalogItem;

/// Scoring weights for the different match signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Query is a substring of the title
    pub title_contains: f64,
    /// Query is a substring of the author
    pub author_contains: f64,
    /// Query is a substring of the description
    pub description_contains: f64,
    /// Similarity credited for a description hit
    pub description_similarity: f64,
    /// Title starts with the query
    pub title_prefix: f64,
    /// Author starts with the query
    pub author_prefix: f64,
    /// Multiplier for a fuzzy title-word match
    pub title_word: f64,
    /// Multiplier for a fuzzy author-word match
    pub author_word: f64,
    /// Multiplier for a fuzzy tag match
    pub tag: f64,
    /// Multiplier for a fuzzy category match
    pub category: f64,
    /// Points per rating star
    pub rating_bonus: f64,
    /// Multiplier for ln(review_count + 1)
    pub review_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title_contains: 100.0,
            author_contains: 80.0,
            description_contains: 30.0,
            description_similarity: 0.8,
            title_prefix: 50.0,
            author_prefix: 40.0,
            title_word: 40.0,
            author_word: 30.0,
            tag: 20.0,
            category: 15.0,
            rating_bonus: 2.0,
            review_bonus: 1.0,
        }
    }
}

/// Relevance of one item for one query
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RelevanceScore {
    /// Accumulated weighted score
    pub score: f64,
    /// Best similarity seen across all comparisons, in `[0, 1]`
    pub max_similarity: f64,
    /// Whether a substring or prefix signal fired
    pub has_direct_match: bool,
}

impl RelevanceScore {
    fn observe(&mut self, similarity: f64) {
        if similarity > self.max_similarity {
            self.max_similarity = similarity;
        }
    }
}

/// A catalog item paired with its relevance for the current search
#[derive(Debug, Clone)]
pub struct ScoredItem {
    pub item: CatalogItem,
    pub score: f64,
    pub max_similarity: f64,
}

/// Scores items against a query
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
    fuzzy_threshold: f64,
}

impl RelevanceScorer {
    pub fn new(weights: ScoringWeights, fuzzy_threshold: f64) -> Self {
        Self {
            weights,
            fuzzy_threshold,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    /// Parse `query` and score `item` against it
    pub fn score_str(&self, item: &CatalogItem, query: &str) -> RelevanceScore {
        self.score(item, &QueryParser::parse(query))
    }

    /// Score an item against an already parsed query
    pub fn score(&self, item: &CatalogItem, query: &ParsedQuery) -> RelevanceScore {
        let mut result = RelevanceScore::default();
        if query.is_empty() {
            return result;
        }

        self.score_direct(item, &query.whole_query, &mut result);
        self.score_fuzzy(item, &query.individual_words, &mut result);

        if result.score > 0.0 {
            let w = &self.weights;
            result.score += item.rating * w.rating_bonus;
            result.score += (item.review_count as f64).ln_1p() * w.review_bonus;
        }

        result
    }

    /// Substring containment and prefix bonuses
    fn score_direct(&self, item: &CatalogItem, needle: &str, result: &mut RelevanceScore) {
        let w = &self.weights;
        let title = item.title.to_lowercase();
        let author = item.author.to_lowercase();
        let description = item.description.to_lowercase();

        if title.contains(needle) {
            result.score += w.title_contains;
            result.max_similarity = 1.0;
            result.has_direct_match = true;
        }
        if author.contains(needle) {
            result.score += w.author_contains;
            result.max_similarity = 1.0;
            result.has_direct_match = true;
        }
        if description.contains(needle) {
            result.score += w.description_contains;
            result.observe(w.description_similarity);
            result.has_direct_match = true;
        }

        if title.starts_with(needle) {
            result.score += w.title_prefix;
            result.max_similarity = 1.0;
            result.has_direct_match = true;
        }
        if author.starts_with(needle) {
            result.score += w.author_prefix;
            result.max_similarity = 1.0;
            result.has_direct_match = true;
        }
    }

    /// Word-by-word fuzzy matching against title, author, tags and category
    fn score_fuzzy(&self, item: &CatalogItem, query_words: &[String], result: &mut RelevanceScore) {
        if query_words.is_empty() {
            return;
        }

        let w = &self.weights;
        let title_words = field_words(&item.title);
        let author_words = field_words(&item.author);
        let tags: Vec<String> = item.tags().iter().map(|t| t.to_lowercase()).collect();
        let category = item.category.to_lowercase();

        for query_word in query_words {
            for title_word in &title_words {
                self.accumulate(query_word, title_word, w.title_word, result);
            }
            for author_word in &author_words {
                self.accumulate(query_word, author_word, w.author_word, result);
            }
            for tag in &tags {
                self.accumulate(query_word, tag, w.tag, result);
            }
            if !category.is_empty() {
                self.accumulate(query_word, &category, w.category, result);
            }
        }
    }

    fn accumulate(&self, query_word: &str, target: &str, weight: f64, result: &mut RelevanceScore) {
        let sim = similarity(query_word, target);
        result.observe(sim);
        if sim >= self.fuzzy_threshold {
            result.score += sim * weight;
        }
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), 0.6)
    }
}
