//! shelfsearch: typo-tolerant catalog search (Rust)
//!
//! Commands:
//! - `search` - one-shot search over a catalog file or endpoint
//! - `interactive` - debounced search-as-you-type over stdin
//! - `similarity` - inspect the string similarity measure

mod catalog;
mod cli;
mod config;
mod error;
mod http;
mod output;
mod search;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat, SourceArgs};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use catalog::{CatalogSource, HttpCatalog, StaticCatalog};
use config::{load_config, SearchConfig};
use search::{SearchController, SearchEngine, SearchPhase};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let result = match cli.command {
        Commands::Search(args) => execute_search_cli(args).await,
        Commands::Interactive(args) => execute_interactive_cli(args).await,
        Commands::Similarity(args) => execute_similarity_cli(args),
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Build the catalog collaborator named on the command line
fn build_source(args: &SourceArgs, config: &SearchConfig) -> Result<Arc<dyn CatalogSource>> {
    if let Some(path) = &args.catalog {
        let catalog = StaticCatalog::from_json_file(path).map_err(|e| anyhow!(e.message()))?;
        info!("Loaded {} books from {}", catalog.items().len(), path.display());
        return Ok(Arc::new(catalog));
    }

    if let Some(url) = &args.url {
        let catalog = HttpCatalog::new(url, config.http_timeout()).map_err(|e| anyhow!(e.message()))?;
        info!("Using catalog endpoint {}", url);
        return Ok(Arc::new(catalog));
    }

    Err(anyhow!("Invalid usage: either --catalog or --url is required"))
}

fn load_effective_config(filters: &cli::FilterArgs) -> Result<SearchConfig> {
    let config = filters.apply_to(load_config(filters.config.as_deref())?);
    config.validate().map_err(|e| anyhow!(e.message()))?;
    debug!("Effective config: {:?}", config);
    Ok(config)
}

/// Execute search command in CLI mode
async fn execute_search_cli(args: cli::SearchArgs) -> Result<String> {
    error::validate_query(&args.query).map_err(|e| anyhow!(e.message()))?;

    let config = load_effective_config(&args.filters)?;
    let source = build_source(&args.source, &config)?;
    let engine = SearchEngine::from_config(&config);
    // Unscored items get no score in the report
    let scorer = config.enable_fuzzy_match.then(|| engine.scorer().clone());

    let controller = SearchController::spawn(source, config);
    controller.set_filters(args.filters.filter_set());
    controller.set_query(args.query.clone());
    controller.search();

    let snapshot = timeout(Duration::from_secs(args.timeout_secs), controller.settled())
        .await
        .map_err(|_| anyhow!("Request exceeded {} second timeout", args.timeout_secs))?;

    if let Some(message) = snapshot.error() {
        return Err(anyhow!("Catalog request failed (network): {}", message));
    }

    match args.format {
        OutputFormat::Markdown => Ok(output::format_markdown(&snapshot.result, &args.query)),
        OutputFormat::Json => output::format_json(&snapshot.result, &args.query, scorer.as_ref())
            .map_err(|e| anyhow!(e.message())),
    }
}

/// Execute interactive command in CLI mode
async fn execute_interactive_cli(args: cli::InteractiveArgs) -> Result<String> {
    let mut config = load_effective_config(&args.filters)?;
    if let Some(ms) = args.debounce_ms {
        config = config.with_debounce_ms(ms);
    }
    let source = build_source(&args.source, &config)?;

    let controller = SearchController::spawn(source, config);
    controller.set_filters(args.filters.filter_set());

    // Print every search that finishes, whether it succeeded or failed
    let mut updates = controller.subscribe();
    let printer = tokio::spawn(async move {
        let mut previous = SearchPhase::Idle;
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            let finished = matches!(snapshot.phase, SearchPhase::Done | SearchPhase::Error);
            if finished && !previous.is_settled() {
                println!("{}", output::format_markdown(&snapshot.result, &snapshot.query));
            }
            previous = snapshot.phase;
        }
    });

    eprintln!("Type to search. :search runs now, :clear resets, :quit exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":clear" => controller.clear(),
            ":search" => controller.search(),
            _ => {
                if let Err(e) = error::validate_query(&line) {
                    eprintln!("{}", e.message());
                    continue;
                }
                controller.set_query(line);
            }
        }
    }

    // Let the last query finish before shutting the controller down
    controller.settled().await;
    drop(controller);
    printer.await?;

    Ok(String::new())
}

/// Execute similarity command in CLI mode
fn execute_similarity_cli(args: cli::SimilarityArgs) -> Result<String> {
    if !(0.0..=1.0).contains(&args.threshold) {
        return Err(anyhow!("Invalid threshold {}: must be within [0, 1]", args.threshold));
    }

    let distance = search::similarity::distance(&args.left, &args.right);
    let similarity = search::similarity::similarity(&args.left, &args.right);
    let matched = search::similarity::is_match(&args.left, &args.right, args.threshold);

    Ok(format!(
        "distance: {}\nsimilarity: {:.3}\nmatch (>= {}): {}",
        distance, similarity, args.threshold, matched
    ))
}

/// Map errors to exit codes
fn get_exit_code(err: &anyhow::Error) -> i32 {
    let err_str = err.to_string().to_lowercase();

    if err_str.contains("invalid") || err_str.contains("usage") {
        1 // Invalid arguments or usage error
    } else if err_str.contains("network") || err_str.contains("connection") {
        2 // Network or catalog endpoint error
    } else if err_str.contains("not found") || err_str.contains("no such file") || err_str.contains("failed to read") {
        3 // Missing catalog or config file
    } else if err_str.contains("timeout") {
        4 // Timeout error
    } else {
        5 // Other application errors
    }
}
