//! Search configuration
//!
//! Thresholds and timings are plain data handed to the engine and the
//! controller at construction. They can be loaded from a JSON file; every
//! field is optional and falls back to its default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::AppError;
use crate::search::admission::{AdmissionPolicy, MINIMUM_MATCH_QUALITY, MINIMUM_RELEVANCE_SCORE};
use crate::search::ranking::ScoringWeights;

/// Search behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last query change before searching
    pub debounce_ms: u64,
    /// Word similarity needed before a fuzzy match adds to the score
    pub fuzzy_threshold: f64,
    /// Admission: best similarity floor
    pub min_match_quality: f64,
    /// Admission: score floor
    pub min_score: f64,
    /// When false, fetched items skip scoring and admission
    pub enable_fuzzy_match: bool,
    /// Items requested per catalog fetch
    pub page_size: usize,
    /// Timeout for HTTP catalog requests
    pub http_timeout_secs: u64,
    pub weights: ScoringWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            fuzzy_threshold: 0.6,
            min_match_quality: MINIMUM_MATCH_QUALITY,
            min_score: MINIMUM_RELEVANCE_SCORE,
            enable_fuzzy_match: true,
            page_size: 1000,
            http_timeout_secs: 30,
            weights: ScoringWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn admission(&self) -> AdmissionPolicy {
        AdmissionPolicy::new(self.min_match_quality, self.min_score)
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_fuzzy_match(mut self, enabled: bool) -> Self {
        self.enable_fuzzy_match = enabled;
        self
    }

    /// Reject settings the pipeline cannot work with
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, value) in [
            ("fuzzy_threshold", self.fuzzy_threshold),
            ("min_match_quality", self.min_match_quality),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.min_score.is_nan() || self.min_score < 0.0 {
            return Err(AppError::InvalidConfig(format!(
                "min_score must not be negative, got {}",
                self.min_score
            )));
        }

        if self.page_size == 0 {
            return Err(AppError::InvalidConfig("page_size must be positive".to_string()));
        }

        Ok(())
    }
}

/// Default location of the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("shelfsearch").join("config.json"))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is tried
/// and a missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default_path = match config_path() {
                Ok(p) => p,
                Err(_) => return Ok(SearchConfig::default()),
            };
            if !default_path.exists() {
                return Ok(SearchConfig::default());
            }
            default_path
        }
    };

    let data = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: SearchConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config.validate()?;
    debug!("Loaded search config from {}", path.display());

    Ok(config)
}
