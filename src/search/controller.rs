//! Debounced, cancellable search controller
//!
//! A single actor task owns all search state. Callers hold a cheap, cloneable
//! [`SearchController`] handle that sends commands over a channel and observes
//! [`SearchSnapshot`]s through a `watch` channel.
//!
//! Lifecycle of one search:
//! `Idle → Debouncing → Fetching → Scoring → Done`, or `Error` when the fetch
//! fails. Each fetch runs in its own task under a [`CancellationToken`] and is
//! tagged with a generation; only the newest generation may change state.

use std::future::pending;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::engine::{SearchEngine, SearchResult};
use super::filters::FilterSet;
use crate::catalog::{CatalogItem, CatalogPage, CatalogRequest, CatalogSource, FetchError};
use crate::config::SearchConfig;

/// Where the controller is in the search lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    #[default]
    Idle,
    Debouncing,
    Fetching,
    Scoring,
    Done,
    Error,
}

impl SearchPhase {
    /// No timer pending and no fetch outstanding
    pub fn is_settled(self) -> bool {
        matches!(self, SearchPhase::Idle | SearchPhase::Done | SearchPhase::Error)
    }
}

/// Observable controller state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSnapshot {
    pub phase: SearchPhase,
    /// Latest query set by the caller (not necessarily searched yet)
    pub query: String,
    pub filters: FilterSet,
    pub result: SearchResult,
    pub is_loading: bool,
    /// Sequence number of the last command the actor processed
    #[serde(skip)]
    pub seq: u64,
}

impl SearchSnapshot {
    pub fn results(&self) -> &[CatalogItem] {
        &self.result.items
    }

    pub fn error(&self) -> Option<&str> {
        self.result.error.as_deref()
    }

    pub fn total_count(&self) -> usize {
        self.result.total_count
    }

    pub fn has_more(&self) -> bool {
        self.result.has_more
    }
}

#[derive(Debug)]
enum Command {
    SetQuery(String),
    SetFilters(FilterSet),
    SearchNow,
    Clear(Option<FilterSet>),
}

struct FetchOutcome {
    generation: u64,
    query: String,
    filters: FilterSet,
    result: Result<CatalogPage, FetchError>,
}

/// Handle to a running search actor
#[derive(Clone)]
pub struct SearchController {
    commands: mpsc::UnboundedSender<(u64, Command)>,
    snapshot: watch::Receiver<SearchSnapshot>,
    next_seq: Arc<AtomicU64>,
}

impl SearchController {
    /// Start the actor on the current tokio runtime.
    ///
    /// The actor stops, cancelling any outstanding fetch, once every handle
    /// has been dropped.
    pub fn spawn(source: Arc<dyn CatalogSource>, config: SearchConfig) -> Self {
        Self::spawn_with(source, config, String::new(), FilterSet::default())
    }

    /// Start the actor with an initial query and filters.
    ///
    /// A non-empty initial query is searched right away, without waiting
    /// for the debounce timer.
    pub fn spawn_with(
        source: Arc<dyn CatalogSource>,
        config: SearchConfig,
        initial_query: impl Into<String>,
        initial_filters: FilterSet,
    ) -> Self {
        let initial_query = initial_query.into();
        let searching = !initial_query.trim().is_empty();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        // Report the mount-time search before the actor first runs
        let (snapshot_tx, snapshot_rx) = watch::channel(SearchSnapshot {
            phase: if searching { SearchPhase::Fetching } else { SearchPhase::Idle },
            query: initial_query.clone(),
            filters: initial_filters.clone(),
            is_loading: searching,
            ..Default::default()
        });

        let actor = SearchActor {
            engine: SearchEngine::from_config(&config),
            source,
            config,
            commands: command_rx,
            outcomes_tx: outcome_tx,
            outcomes_rx: outcome_rx,
            snapshot: snapshot_tx,
            query: initial_query.clone(),
            debounced_query: initial_query,
            filters: initial_filters,
            deadline: None,
            generation: 0,
            in_flight: None,
            seq: 0,
        };
        tokio::spawn(actor.run());

        Self {
            commands: command_tx,
            snapshot: snapshot_rx,
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Update the query; the search starts once input pauses
    pub fn set_query(&self, query: impl Into<String>) {
        self.send(Command::SetQuery(query.into()));
    }

    /// Replace the filters and re-run the last debounced query
    pub fn set_filters(&self, filters: FilterSet) {
        self.send(Command::SetFilters(filters));
    }

    /// Search the current query right away, skipping the debounce timer
    pub fn search(&self) {
        self.send(Command::SearchNow);
    }

    /// Reset the query and results, keeping the filters
    pub fn clear(&self) {
        self.send(Command::Clear(None));
    }

    /// Reset the query and results, replacing the filters
    pub fn clear_with_filters(&self, filters: FilterSet) {
        self.send(Command::Clear(Some(filters)));
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshot.clone()
    }

    /// Wait until every command sent so far has been processed and the
    /// controller has no pending timer or fetch.
    pub async fn settled(&self) -> SearchSnapshot {
        let target = self.next_seq.load(Ordering::SeqCst);
        let mut rx = self.snapshot.clone();
        let settled = match rx
            .wait_for(|s| s.seq >= target && s.phase.is_settled())
            .await
        {
            Ok(snapshot) => Some(snapshot.clone()),
            // Actor is gone; report the last known state
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.snapshot())
    }

    fn send(&self, command: Command) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        if self.commands.send((seq, command)).is_err() {
            warn!("Search controller is no longer running");
        }
    }
}

struct SearchActor {
    source: Arc<dyn CatalogSource>,
    engine: SearchEngine,
    config: SearchConfig,
    commands: mpsc::UnboundedReceiver<(u64, Command)>,
    outcomes_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    snapshot: watch::Sender<SearchSnapshot>,
    query: String,
    debounced_query: String,
    filters: FilterSet,
    deadline: Option<Instant>,
    generation: u64,
    in_flight: Option<CancellationToken>,
    seq: u64,
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending().await,
    }
}

impl SearchActor {
    async fn run(mut self) {
        if !self.debounced_query.trim().is_empty() {
            self.start_search();
        }

        loop {
            let deadline = self.deadline;
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some((seq, command)) => {
                        self.seq = seq;
                        self.handle(command);
                    }
                    None => break,
                },
                _ = sleep_until_deadline(deadline) => {
                    self.deadline = None;
                    self.debounced_query = self.query.clone();
                    debug!("Debounce elapsed for '{}'", self.debounced_query);
                    self.start_search();
                }
                Some(outcome) = self.outcomes_rx.recv() => self.complete(outcome),
            }
        }

        self.cancel_in_flight();
        debug!("Search controller stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::SetQuery(query) => {
                if query == self.query {
                    self.publish(|_| {});
                    return;
                }
                self.query = query;
                self.deadline = Some(Instant::now() + self.config.debounce());
                let query = self.query.clone();
                self.publish(|s| {
                    s.query = query;
                    s.phase = SearchPhase::Debouncing;
                });
            }
            Command::SetFilters(filters) => {
                self.filters = filters;
                let filters = self.filters.clone();
                self.publish(|s| s.filters = filters);
                // A pending debounce will pick the new filters up
                if self.deadline.is_none() {
                    self.start_search();
                }
            }
            Command::SearchNow => {
                self.deadline = None;
                self.debounced_query = self.query.clone();
                self.start_search();
            }
            Command::Clear(filters) => {
                self.cancel_in_flight();
                self.deadline = None;
                self.query.clear();
                self.debounced_query.clear();
                if let Some(filters) = filters {
                    self.filters = filters;
                }
                let filters = self.filters.clone();
                self.publish(|s| {
                    s.query.clear();
                    s.filters = filters;
                    s.result = SearchResult::empty();
                    s.is_loading = false;
                    s.phase = SearchPhase::Idle;
                });
            }
        }
    }

    fn start_search(&mut self) {
        self.cancel_in_flight();

        let query = self.debounced_query.clone();
        if query.trim().is_empty() {
            self.publish(|s| {
                s.result = SearchResult::empty();
                s.is_loading = false;
                s.phase = SearchPhase::Idle;
            });
            return;
        }

        let generation = self.generation;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());

        let request = CatalogRequest {
            query: String::new(),
            limit: self.config.page_size,
            filters: self.filters.clone(),
        };
        let filters = self.filters.clone();
        let source = Arc::clone(&self.source);
        let outcomes = self.outcomes_tx.clone();

        debug!("Fetching catalog for '{}' (generation {})", query, generation);
        self.publish(|s| {
            s.result.error = None;
            s.is_loading = true;
            s.phase = SearchPhase::Fetching;
        });

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => Err(FetchError::Cancelled),
                fetched = source.fetch(&request) => fetched,
            };
            // The actor may have shut down meanwhile
            let _ = outcomes.send(FetchOutcome {
                generation,
                query,
                filters,
                result,
            });
        });
    }

    fn complete(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            debug!("Discarding superseded fetch (generation {})", outcome.generation);
            return;
        }
        self.in_flight = None;

        // A newer query is still debouncing; keep reporting that
        let settled_phase = |phase| {
            if self.deadline.is_some() {
                SearchPhase::Debouncing
            } else {
                phase
            }
        };

        match outcome.result {
            Err(FetchError::Cancelled) => {
                // The source gave up on its own; settle on whatever was shown before
                debug!("Fetch for '{}' cancelled by the source", outcome.query);
                let debouncing = self.deadline.is_some();
                self.publish(|s| {
                    s.is_loading = false;
                    s.result.error = None;
                    s.phase = if debouncing {
                        SearchPhase::Debouncing
                    } else if s.result == SearchResult::empty() {
                        SearchPhase::Idle
                    } else {
                        SearchPhase::Done
                    };
                });
            }
            Err(FetchError::Failed(message)) => {
                warn!("Search for '{}' failed: {}", outcome.query, message);
                let phase = settled_phase(SearchPhase::Error);
                self.publish(|s| {
                    s.result = SearchResult::failed(message);
                    s.is_loading = false;
                    s.phase = phase;
                });
            }
            Ok(page) => {
                self.publish(|s| s.phase = SearchPhase::Scoring);
                let result = self.engine.run(&outcome.query, page, &outcome.filters);
                info!(
                    "Search for '{}' done: {} results (has_more={})",
                    outcome.query, result.total_count, result.has_more
                );
                let phase = settled_phase(SearchPhase::Done);
                self.publish(|s| {
                    s.result = result;
                    s.is_loading = false;
                    s.phase = phase;
                });
            }
        }
    }

    /// Cancel the outstanding fetch, if any, and invalidate its generation
    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            debug!("Cancelling fetch (generation {})", self.generation);
            token.cancel();
        }
        self.generation += 1;
    }

    fn publish(&self, update: impl FnOnce(&mut SearchSnapshot)) {
        let seq = self.seq;
        self.snapshot.send_modify(|s| {
            update(s);
            s.seq = seq;
        });
    }
}
