use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStatus {
    Fetched { bytes: usize },
    Failed { reason: String },
}

/// One fetch attempt for a canonical address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub address: String,
    /// Page the address was discovered on; empty for the seed.
    pub parent: String,
    /// Hops from the seed along the breadth-first discovery path.
    pub distance: usize,
    pub status: FetchStatus,
    pub raw_links: Vec<String>,
}

impl PageRecord {
    pub fn fetched(
        address: String,
        parent: String,
        distance: usize,
        bytes: usize,
        raw_links: Vec<String>,
    ) -> Self {
        Self {
            address,
            parent,
            distance,
            status: FetchStatus::Fetched { bytes },
            raw_links,
        }
    }

    pub fn failed(address: String, parent: String, distance: usize, reason: String) -> Self {
        Self {
            address,
            parent,
            distance,
            status: FetchStatus::Failed { reason },
            raw_links: Vec::new(),
        }
    }
}

/// A normalized outgoing link discovered on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildLink {
    pub address: String,
    pub distance: usize,
    pub external: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEntry {
    pub page: PageRecord,
    pub children: Vec<ChildLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub address: String,
    pub parent: String,
    pub reason: String,
}

/// Pages reached by a crawl, keyed by address in traversal order.
///
/// An address is a key at most once. Only the frontier engine mutates a graph;
/// everything else reads a finished one.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlGraph {
    seed: String,
    prefix: String,
    entries: Vec<GraphEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    failed: Vec<PageRecord>,
    external: Vec<String>,
    #[serde(skip)]
    external_seen: HashSet<String>,
    duplicates: usize,
    links_visited: usize,
    link_budget: usize,
}

impl CrawlGraph {
    pub fn new(seed: impl Into<String>, prefix: impl Into<String>, link_budget: usize) -> Self {
        Self {
            seed: seed.into(),
            prefix: prefix.into(),
            entries: Vec::new(),
            index: HashMap::new(),
            failed: Vec::new(),
            external: Vec::new(),
            external_seen: HashSet::new(),
            duplicates: 0,
            links_visited: 0,
            link_budget,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn contains(&self, address: &str) -> bool {
        self.index.contains_key(address)
    }

    pub fn get(&self, address: &str) -> Option<&GraphEntry> {
        self.index.get(address).map(|&idx| &self.entries[idx])
    }

    /// Entries in traversal order.
    pub fn entries(&self) -> impl Iterator<Item = &GraphEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pages whose fetch failed, in the order they were attempted. None of
    /// them is a key.
    pub fn failed_pages(&self) -> &[PageRecord] {
        &self.failed
    }

    pub fn broken_links(&self) -> Vec<BrokenLink> {
        self.failed
            .iter()
            .filter_map(|page| match &page.status {
                FetchStatus::Failed { reason } => Some(BrokenLink {
                    address: page.address.clone(),
                    parent: page.parent.clone(),
                    reason: reason.clone(),
                }),
                FetchStatus::Fetched { .. } => None,
            })
            .collect()
    }

    pub fn external_links(&self) -> &[String] {
        &self.external
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn links_visited(&self) -> usize {
        self.links_visited
    }

    pub fn link_budget(&self) -> usize {
        self.link_budget
    }

    /// Inserts `entry` unless its address is already a key. Returns whether it
    /// was inserted.
    pub(crate) fn insert(&mut self, entry: GraphEntry) -> bool {
        if self.index.contains_key(&entry.page.address) {
            return false;
        }
        self.index.insert(entry.page.address.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Keeps the record of a page whose fetch failed. The page does not
    /// become a key.
    pub(crate) fn record_failure(&mut self, page: PageRecord) {
        self.failed.push(page);
    }

    pub(crate) fn record_external(&mut self, address: &str) {
        if self.external_seen.insert(address.to_string()) {
            self.external.push(address.to_string());
        }
    }

    pub(crate) fn record_duplicate(&mut self) {
        self.duplicates += 1;
    }

    /// Counts one more considered link against the budget. Returns `false`,
    /// without counting, once the budget is spent.
    pub(crate) fn consume_budget(&mut self) -> bool {
        if self.links_visited >= self.link_budget {
            return false;
        }
        self.links_visited += 1;
        true
    }

    pub(crate) fn budget_exhausted(&self) -> bool {
        self.links_visited >= self.link_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(address: &str, distance: usize) -> GraphEntry {
        GraphEntry {
            page: PageRecord::fetched(address.to_string(), String::new(), distance, 0, Vec::new()),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_first_insert_wins() {
        let mut graph = CrawlGraph::new("http://a.edu", "a.edu", 10);
        assert!(graph.insert(entry("http://a.edu", 0)));
        assert!(!graph.insert(entry("http://a.edu", 3)));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get("http://a.edu").unwrap().page.distance, 0);
    }

    #[test]
    fn test_entries_keep_traversal_order() {
        let mut graph = CrawlGraph::new("http://a.edu", "a.edu", 10);
        graph.insert(entry("http://a.edu", 0));
        graph.insert(entry("http://a.edu/z", 1));
        graph.insert(entry("http://a.edu/b", 1));
        let order: Vec<_> = graph.entries().map(|e| e.page.address.as_str()).collect();
        assert_eq!(order, vec!["http://a.edu", "http://a.edu/z", "http://a.edu/b"]);
    }

    #[test]
    fn test_external_links_deduplicated_in_order() {
        let mut graph = CrawlGraph::new("http://a.edu", "a.edu", 10);
        graph.record_external("http://x.com");
        graph.record_external("http://y.com");
        graph.record_external("http://x.com");
        assert_eq!(graph.external_links(), ["http://x.com", "http://y.com"]);
    }

    #[test]
    fn test_failed_pages_become_broken_links() {
        let mut graph = CrawlGraph::new("http://a.edu", "a.edu", 10);
        graph.record_failure(PageRecord::failed(
            "http://a.edu/gone".to_string(),
            "http://a.edu".to_string(),
            1,
            "HTTP 404".to_string(),
        ));

        assert!(!graph.contains("http://a.edu/gone"));
        assert_eq!(graph.failed_pages()[0].distance, 1);
        assert_eq!(
            graph.failed_pages()[0].status,
            FetchStatus::Failed {
                reason: "HTTP 404".to_string()
            }
        );
        assert_eq!(
            graph.broken_links(),
            vec![BrokenLink {
                address: "http://a.edu/gone".to_string(),
                parent: "http://a.edu".to_string(),
                reason: "HTTP 404".to_string(),
            }]
        );
    }

    #[test]
    fn test_budget_never_exceeded() {
        let mut graph = CrawlGraph::new("http://a.edu", "a.edu", 2);
        assert!(graph.consume_budget());
        assert!(graph.consume_budget());
        assert!(!graph.consume_budget());
        assert_eq!(graph.links_visited(), 2);
        assert!(graph.budget_exhausted());
    }
}
