use crate::error::{Result, ScanError};
use crate::extract::extract_links;
use crate::fetch::Fetcher;
use crate::graph::{ChildLink, CrawlGraph, GraphEntry, PageRecord};
use crate::normalize::normalize;
use crate::scope::Scope;
use futures::future::join_all;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use url::Url;

/// Called with the running fetch count and the address about to be fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Most outgoing links the crawl will consider.
    pub link_budget: usize,
    /// Fetches allowed in flight at once.
    pub workers: usize,
    /// Pause between successive fetch dispatches.
    pub delay: Duration,
    /// Scope prefix; derived from the seed when `None`.
    pub prefix: Option<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            link_budget: 1000,
            workers: 1,
            delay: Duration::from_millis(500),
            prefix: None,
        }
    }
}

/// A discovered address waiting in the frontier.
#[derive(Debug, Clone)]
struct Pending {
    address: String,
    parent: String,
    distance: usize,
}

/// Breadth-first frontier engine.
///
/// Addresses leave the frontier in FIFO order and are claimed at most once, so
/// the distance recorded at first visit is the shortest hop count found within
/// the budget. With more than one worker, up to `workers` claimed addresses are
/// fetched concurrently and their results applied in claim order, which yields
/// the same graph as a single worker.
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlerConfig,
    progress_callback: Option<ProgressCallback>,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            config: CrawlerConfig::default(),
            progress_callback: None,
        }
    }

    pub fn with_config(mut self, config: CrawlerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_link_budget(mut self, link_budget: usize) -> Self {
        self.config.link_budget = link_budget;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = Some(prefix.into());
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub async fn crawl(&self, seed: &str) -> Result<CrawlGraph> {
        Url::parse(seed).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", seed, e)))?;

        let scope = match &self.config.prefix {
            Some(prefix) if !prefix.is_empty() => Scope::new(prefix.clone()),
            _ => Scope::for_seed(seed),
        };
        let workers = self.config.workers.max(1);

        info!(
            "Starting crawl of {} within '{}' (budget {}, {} workers)",
            seed,
            scope.prefix(),
            self.config.link_budget,
            workers
        );
        if !scope.is_in_scope(seed) {
            warn!("Seed {} is outside prefix '{}'", seed, scope.prefix());
        }

        let mut graph = CrawlGraph::new(seed, scope.prefix(), self.config.link_budget);
        let mut frontier = VecDeque::new();
        frontier.push_back(Pending {
            address: seed.to_string(),
            parent: String::new(),
            distance: 0,
        });
        let mut visited = HashSet::new();
        let mut dispatched = 0;

        'crawl: loop {
            let batch = claim_batch(&mut frontier, &mut visited, &scope, &mut graph, workers);
            if batch.is_empty() {
                break;
            }

            if dispatched > 0 && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }

            let fetches = batch.iter().map(|pending| {
                dispatched += 1;
                if let Some(ref callback) = self.progress_callback {
                    callback(dispatched, pending.address.clone());
                }
                self.fetcher.fetch(&pending.address)
            });
            let results = join_all(fetches).await;

            for (pending, result) in batch.into_iter().zip(results) {
                match result {
                    Ok(content) => expand(pending, content, &scope, &mut graph, &mut frontier),
                    Err(e) => {
                        warn!("Broken link {} (found on '{}'): {}", pending.address, pending.parent, e);
                        graph.record_failure(PageRecord::failed(
                            pending.address,
                            pending.parent,
                            pending.distance,
                            e.to_string(),
                        ));
                    }
                }

                if graph.budget_exhausted() {
                    info!("Link budget of {} exhausted", graph.link_budget());
                    break 'crawl;
                }
            }
        }

        info!(
            "Crawl complete. {} pages, {} broken, {} external, {} duplicates",
            graph.len(),
            graph.broken_links().len(),
            graph.external_links().len(),
            graph.duplicates()
        );
        Ok(graph)
    }
}

/// Pops up to `workers` fetchable addresses off the front of the frontier.
/// Out-of-scope addresses are dropped and already claimed ones are counted as
/// duplicates.
fn claim_batch(
    frontier: &mut VecDeque<Pending>,
    visited: &mut HashSet<String>,
    scope: &Scope,
    graph: &mut CrawlGraph,
    workers: usize,
) -> Vec<Pending> {
    let mut batch = Vec::with_capacity(workers);
    while batch.len() < workers {
        let Some(pending) = frontier.pop_front() else {
            break;
        };
        if !scope.is_in_scope(&pending.address) {
            trace!("Out of scope: {}", pending.address);
            continue;
        }
        if !visited.insert(pending.address.clone()) {
            trace!("Already visited: {}", pending.address);
            graph.record_duplicate();
            continue;
        }
        batch.push(pending);
    }
    batch
}

/// Normalizes and classifies the links of a fetched page, queues the in-scope
/// ones and stores the page under its address.
fn expand(
    pending: Pending,
    content: String,
    scope: &Scope,
    graph: &mut CrawlGraph,
    frontier: &mut VecDeque<Pending>,
) {
    let raw_links = extract_links(&content);
    let distance = pending.distance + 1;
    let mut children = Vec::new();

    for raw in &raw_links {
        let address = match normalize(raw, &pending.address) {
            Ok(address) => address,
            Err(reason) => {
                trace!("Dropping {:?} on {}: {}", raw, pending.address, reason);
                continue;
            }
        };
        if !graph.consume_budget() {
            debug!("Budget spent while expanding {}", pending.address);
            break;
        }

        let external = scope.is_external(&address);
        if external {
            graph.record_external(&address);
        } else {
            frontier.push_back(Pending {
                address: address.clone(),
                parent: pending.address.clone(),
                distance,
            });
        }
        children.push(ChildLink {
            address,
            distance,
            external,
        });
    }

    debug!(
        "Expanded {} at distance {}: {} of {} links kept",
        pending.address,
        pending.distance,
        children.len(),
        raw_links.len()
    );
    let page = PageRecord::fetched(
        pending.address,
        pending.parent,
        pending.distance,
        content.len(),
        raw_links,
    );
    graph.insert(GraphEntry { page, children });
}
