//! CLI mode implementation
//!
//! Provides the command-line interface for the search pipeline

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::SearchConfig;
use crate::search::{FilterSet, SortMode};

/// shelfsearch CLI
#[derive(Parser)]
#[command(name = "shelfsearch")]
#[command(about = "Typo-tolerant book catalog search", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one search against a catalog
    Search(SearchArgs),
    /// Read queries from stdin and search as you type
    Interactive(InteractiveArgs),
    /// Compare two strings with the matcher's similarity measure
    Similarity(SimilarityArgs),
}

/// Output format for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Where the catalog comes from
#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// JSON catalog file (array of books or paginated response)
    #[arg(short = 'c', long)]
    pub catalog: Option<PathBuf>,

    /// Catalog endpoint URL
    #[arg(short = 'u', long, env = "SHELFSEARCH_URL")]
    pub url: Option<String>,
}

/// Structured filters and search tuning shared by search commands
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Only books in this category (case-insensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Lowest price (inclusive)
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price (inclusive)
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Only books currently in stock
    #[arg(long)]
    pub in_stock: bool,

    /// Result ordering
    #[arg(long, value_enum)]
    pub sort: Option<SortMode>,

    /// Skip fuzzy scoring; only filter and sort
    #[arg(long)]
    pub no_fuzzy: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl FilterArgs {
    /// A missing price bound is open on that side
    pub fn filter_set(&self) -> FilterSet {
        let price_range = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => Some((min.unwrap_or(0.0), max.unwrap_or(f64::INFINITY))),
        };

        FilterSet {
            category: self.category.clone(),
            price_range,
            min_rating: self.min_rating,
            in_stock_only: self.in_stock,
            sort_by: self.sort,
        }
    }

    /// Apply flag overrides on top of the loaded configuration
    pub fn apply_to(&self, mut config: SearchConfig) -> SearchConfig {
        if self.no_fuzzy {
            config.enable_fuzzy_match = false;
        }
        config
    }
}

/// Search command arguments
#[derive(Parser, Clone, Debug)]
pub struct SearchArgs {
    /// Search terms (case-insensitive, typos tolerated)
    #[arg(short = 'q', long)]
    pub query: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Give up after this many seconds
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,
}

/// Interactive command arguments
#[derive(Parser, Clone, Debug)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Override the debounce delay in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

/// Similarity command arguments
#[derive(Parser, Clone, Debug)]
pub struct SimilarityArgs {
    pub left: String,
    pub right: String,

    /// Similarity needed to count as a match
    #[arg(short = 't', long, default_value_t = 0.6)]
    pub threshold: f64,
}
