pub mod analytics;
pub mod crawl;
pub mod report;

pub use analytics::{Analytics, CrawlSummary};
pub use crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl, extract_url_path};
pub use report::{ReportAction, ReportData, ReportFormat};

/// Program banner shown before a crawl unless `--quiet` is given.
pub fn print_banner() {
    use colored::Colorize;

    println!(
        "{} {}",
        "homebound".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "which pages can't get home?".bright_black());
    println!();
}
