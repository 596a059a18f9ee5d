pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod graph;
pub mod normalize;
pub mod scope;

pub use crawler::{Crawler, CrawlerConfig, ProgressCallback};
pub use error::{FetchError, RejectedLink, ScanError};
pub use fetch::{Fetcher, HttpFetcher};
pub use graph::{BrokenLink, ChildLink, CrawlGraph, FetchStatus, GraphEntry, PageRecord};
pub use scope::Scope;
