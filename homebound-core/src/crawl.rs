use homebound_scanner::{CrawlGraph, Crawler, CrawlerConfig, HttpFetcher, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub seed: String,
    /// Scope prefix; derived from the seed when `None`.
    pub prefix: Option<String>,
    pub link_budget: usize,
    pub workers: usize,
    pub delay: Duration,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl CrawlOptions {
    pub fn new(seed: impl Into<String>) -> Self {
        let defaults = CrawlerConfig::default();
        Self {
            seed: seed.into(),
            prefix: None,
            link_budget: defaults.link_budget,
            workers: defaults.workers,
            delay: defaults.delay,
            timeout_secs: 10,
            show_progress_bars: false,
        }
    }

    pub fn crawler_config(&self) -> CrawlerConfig {
        CrawlerConfig {
            link_budget: self.link_budget,
            workers: self.workers,
            delay: self.delay,
            prefix: self.prefix.clone(),
        }
    }
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Crawl from `options.seed` over HTTP and return the finished graph.
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> homebound_scanner::error::Result<CrawlGraph> {
    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(pb)
    } else {
        None
    };

    let internal_progress_callback: ProgressCallback = {
        let pb = progress_bar.clone();
        let callback = progress_callback;
        Arc::new(move |count: usize, url: String| {
            if let Some(ref pb) = pb {
                pb.set_message(format!(
                    "Crawling... {} pages fetched ({})",
                    count,
                    extract_url_path(&url)
                ));
            }
            if let Some(ref callback) = callback {
                callback(format!("[{}] {}", count, url));
            }
        })
    };

    let fetcher = HttpFetcher::with_timeout(options.timeout_secs)?;
    let crawler = Crawler::new(fetcher)
        .with_config(options.crawler_config())
        .with_progress_callback(internal_progress_callback);

    let result = crawler.crawl(&options.seed).await;

    if let Some(ref pb) = progress_bar {
        match &result {
            Ok(graph) => pb.finish_with_message(format!(
                "Crawl complete! {} pages, {} links considered",
                graph.len(),
                graph.links_visited()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }
    if let Ok(ref graph) = result {
        info!("Crawl of {} finished with {} pages", options.seed, graph.len());
    }

    result
}
