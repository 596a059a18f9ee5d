//! Read-only queries over a finished crawl graph.

use homebound_scanner::{BrokenLink, CrawlGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the reports need, computed once from a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub seed: String,
    pub prefix: String,
    pub unique_pages: usize,
    pub links_visited: usize,
    pub link_budget: usize,
    pub duplicates: usize,
    pub max_distance: usize,
    pub farthest_pages: Vec<String>,
    pub farthest_path: Vec<String>,
    pub external_links: Vec<String>,
    pub broken_links: Vec<BrokenLink>,
    pub stranded_links: Vec<String>,
}

pub struct Analytics<'a> {
    graph: &'a CrawlGraph,
}

impl<'a> Analytics<'a> {
    pub fn new(graph: &'a CrawlGraph) -> Self {
        Self { graph }
    }

    pub fn external_links(&self) -> &'a [String] {
        self.graph.external_links()
    }

    pub fn broken_links(&self) -> Vec<BrokenLink> {
        self.graph.broken_links()
    }

    pub fn unique_pages_visited(&self) -> usize {
        self.graph.len()
    }

    /// Largest breadth-first distance among reached pages; 0 for an empty graph.
    pub fn max_distance(&self) -> usize {
        self.reached()
            .iter()
            .map(|page| page.distance)
            .max()
            .unwrap_or(0)
    }

    /// Pages at [`max_distance`](Self::max_distance), in traversal order.
    pub fn farthest_pages(&self) -> Vec<&'a str> {
        farthest(&self.reached())
    }

    /// Visited pages, other than home, with no direct link back to the seed.
    ///
    /// Only a page's own links count: a page is stranded even when a page
    /// linking to it can get home.
    pub fn stranded_links(&self) -> Vec<&'a str> {
        let seed = self.graph.seed();
        self.graph
            .entries()
            .filter(|entry| !is_home(&entry.page.address, seed))
            .filter(|entry| {
                !entry
                    .children
                    .iter()
                    .any(|child| is_home(&child.address, seed))
            })
            .map(|entry| entry.page.address.as_str())
            .collect()
    }

    /// Discovery path from the seed to `address`, both ends included. Empty
    /// when `address` was never reached.
    pub fn path_to(&self, address: &str) -> Vec<&'a str> {
        path_to(&self.reached(), address)
    }

    /// Path to the first of the farthest pages.
    pub fn farthest_path(&self) -> Vec<&'a str> {
        let reached = self.reached();
        match farthest(&reached).first() {
            Some(address) => path_to(&reached, address),
            None => Vec::new(),
        }
    }

    /// Every page the graph knows of: its keys plus the in-scope links recorded
    /// under them, which covers broken pages and links cut off by the budget.
    /// An address seen more than once keeps its shortest distance.
    fn reached(&self) -> Vec<Reached<'a>> {
        let mut reached: Vec<Reached<'a>> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut note = |address: &'a str, parent: &'a str, distance: usize| {
            match index.get(address) {
                Some(&idx) => {
                    if distance < reached[idx].distance {
                        reached[idx].distance = distance;
                        reached[idx].parent = parent;
                    }
                }
                None => {
                    index.insert(address, reached.len());
                    reached.push(Reached {
                        address,
                        parent,
                        distance,
                    });
                }
            }
        };

        for entry in self.graph.entries() {
            let page = &entry.page;
            note(page.address.as_str(), page.parent.as_str(), page.distance);
            for child in entry.children.iter().filter(|child| !child.external) {
                note(child.address.as_str(), page.address.as_str(), child.distance);
            }
        }
        reached
    }

    pub fn summary(&self) -> CrawlSummary {
        CrawlSummary {
            seed: self.graph.seed().to_string(),
            prefix: self.graph.prefix().to_string(),
            unique_pages: self.unique_pages_visited(),
            links_visited: self.graph.links_visited(),
            link_budget: self.graph.link_budget(),
            duplicates: self.graph.duplicates(),
            max_distance: self.max_distance(),
            farthest_pages: to_owned(self.farthest_pages()),
            farthest_path: to_owned(self.farthest_path()),
            external_links: self.external_links().to_vec(),
            broken_links: self.broken_links(),
            stranded_links: to_owned(self.stranded_links()),
        }
    }
}

/// `address` is the seed, allowing for one trailing slash on either side.
pub fn is_home(address: &str, seed: &str) -> bool {
    address == seed
        || address.strip_suffix('/') == Some(seed)
        || seed.strip_suffix('/') == Some(address)
}

/// A reached address with the page it was first found on at its shortest
/// distance.
struct Reached<'a> {
    address: &'a str,
    parent: &'a str,
    distance: usize,
}

fn farthest<'a>(reached: &[Reached<'a>]) -> Vec<&'a str> {
    let max = reached.iter().map(|page| page.distance).max().unwrap_or(0);
    reached
        .iter()
        .filter(|page| page.distance == max)
        .map(|page| page.address)
        .collect()
}

fn path_to<'a>(reached: &[Reached<'a>], address: &str) -> Vec<&'a str> {
    let by_address: HashMap<&str, &Reached<'a>> =
        reached.iter().map(|page| (page.address, page)).collect();
    let mut path = Vec::new();
    let mut current = by_address.get(address);
    while let Some(page) = current {
        path.push(page.address);
        if page.parent.is_empty() || path.len() > reached.len() {
            break;
        }
        current = by_address.get(page.parent);
    }
    path.reverse();
    path
}

fn to_owned(addresses: Vec<&str>) -> Vec<String> {
    addresses.into_iter().map(str::to_string).collect()
}
