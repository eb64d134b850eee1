//! Strict relevance admission
//!
//! An item survives only if its best word similarity reaches the match-quality
//! floor AND its score reaches the minimum relevance score. There is no
//! fallback: when nothing is admitted, the result is empty.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ranking::ScoredItem;
use crate::catalog::CatalogItem;

/// Default minimum similarity (40%): tolerates typos like "pragmtic"
pub const MINIMUM_MATCH_QUALITY: f64 = 0.4;

/// Default minimum relevance score
pub const MINIMUM_RELEVANCE_SCORE: f64 = 15.0;

/// The two admission thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdmissionPolicy {
    pub min_match_quality: f64,
    pub min_score: f64,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            min_match_quality: MINIMUM_MATCH_QUALITY,
            min_score: MINIMUM_RELEVANCE_SCORE,
        }
    }
}

impl AdmissionPolicy {
    pub fn new(min_match_quality: f64, min_score: f64) -> Self {
        Self {
            min_match_quality,
            min_score,
        }
    }

    /// Both thresholds must hold
    pub fn admits(&self, scored: &ScoredItem) -> bool {
        scored.max_similarity >= self.min_match_quality && scored.score >= self.min_score
    }

    /// Drop items failing either threshold, then order by score descending.
    ///
    /// The sort is stable, so equal scores keep catalog order.
    pub fn admit(&self, scored: Vec<ScoredItem>) -> Vec<CatalogItem> {
        let mut admitted: Vec<ScoredItem> = scored
            .into_iter()
            .filter(|candidate| {
                let pass = self.admits(candidate);
                debug!(
                    "[admission] \"{}\" score={:.1} max_sim={:.0}% pass={}",
                    candidate.item.title,
                    candidate.score,
                    candidate.max_similarity * 100.0,
                    pass
                );
                pass
            })
            .collect();

        admitted.sort_by(|a, b| b.score.total_cmp(&a.score));
        admitted.into_iter().map(|s| s.item).collect()
    }
}

/// [`AdmissionPolicy::admit`] with explicit thresholds
pub fn admit(scored: Vec<ScoredItem>, min_match_quality: f64, min_score: f64) -> Vec<CatalogItem> {
    AdmissionPolicy::new(min_match_quality, min_score).admit(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, score: f64, max_similarity: f64) -> ScoredItem {
        ScoredItem {
            item: CatalogItem {
                id: id.to_string(),
                title: format!("Book {}", id),
                ..Default::default()
            },
            score,
            max_similarity,
        }
    }

    fn ids(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_defaults() {
        let policy = AdmissionPolicy::default();
        assert_eq!(policy.min_match_quality, 0.4);
        assert_eq!(policy.min_score, 15.0);
    }

    #[test]
    fn test_high_score_low_similarity_rejected() {
        let result = admit(vec![scored("a", 120.0, 0.39)], 0.4, 15.0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_high_similarity_low_score_rejected() {
        let result = admit(vec![scored("a", 14.9, 1.0)], 0.4, 15.0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let result = admit(vec![scored("a", 15.0, 0.4)], 0.4, 15.0);
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let result = AdmissionPolicy::default().admit(vec![
            scored("low", 20.0, 0.9),
            scored("high", 200.0, 1.0),
            scored("mid", 60.0, 0.7),
        ]);
        assert_eq!(ids(&result), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let result = AdmissionPolicy::default().admit(vec![
            scored("first", 50.0, 1.0),
            scored("top", 90.0, 1.0),
            scored("second", 50.0, 1.0),
            scored("third", 50.0, 1.0),
        ]);
        assert_eq!(ids(&result), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_nothing_admitted_means_empty() {
        let result = AdmissionPolicy::default().admit(vec![
            scored("a", 0.0, 0.1),
            scored("b", 3.0, 0.2),
        ]);
        assert!(result.is_empty());
    }
}
