use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use homebound_core::crawl::{CrawlOptions, execute_crawl};
use homebound_core::print_banner;
use homebound_core::report::{
    ReportAction, ReportData, ReportFormat, generate_report, save_report,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Everything a crawl run needs, read from the command line.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    pub options: CrawlOptions,
    pub action: ReportAction,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Try to parse as-is
    if let Ok(url) = Url::parse(line) {
        if matches!(url.scheme(), "http" | "https") {
            return Some(line.to_string());
        }
        if line.contains("://") {
            return None;
        }
    }

    // Try adding http://
    let with_scheme = format!("http://{}", line);
    match Url::parse(&with_scheme) {
        Ok(url) if url.host_str().is_some() => Some(with_scheme),
        _ => None,
    }
}

pub fn crawl_request_from_matches(matches: &ArgMatches) -> Result<CrawlRequest> {
    let raw_seed = matches
        .get_one::<String>("URL")
        .ok_or_else(|| anyhow!("a start page is required"))?;
    let seed = parse_url_line(raw_seed)
        .ok_or_else(|| anyhow!("'{}' is not a usable http(s) address", raw_seed))?;
    let quiet = matches.get_flag("quiet");

    let mut options = CrawlOptions::new(seed);
    options.prefix = matches
        .get_one::<String>("searchprefix")
        .filter(|prefix| !prefix.is_empty())
        .cloned();
    if let Some(limit) = matches.get_one::<usize>("linklimit") {
        options.link_budget = *limit;
    }
    if let Some(threads) = matches.get_one::<usize>("threads") {
        options.workers = (*threads).max(1);
    }
    if let Some(delay) = matches.get_one::<u64>("delay") {
        options.delay = Duration::from_millis(*delay);
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        options.timeout_secs = *timeout;
    }
    options.show_progress_bars = !quiet;

    let action = matches
        .get_one::<String>("action")
        .and_then(|action| ReportAction::from_str(action))
        .unwrap_or(ReportAction::Summary);
    let format = matches
        .get_one::<String>("format")
        .and_then(|format| ReportFormat::from_str(format))
        .unwrap_or(ReportFormat::Text);

    Ok(CrawlRequest {
        options,
        action,
        format,
        output: matches.get_one::<PathBuf>("output").cloned(),
        quiet,
    })
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when called more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn handle_crawl(matches: &ArgMatches) -> Result<()> {
    let request = crawl_request_from_matches(matches)?;
    init_tracing();

    // Keep stdout clean when it carries JSON.
    let chatty = !request.quiet && (request.output.is_some() || request.format == ReportFormat::Text);
    if chatty {
        print_banner();
        println!(
            "{} Crawling {} (link limit {}, {} worker{})\n",
            "→".blue(),
            request.options.seed.bright_white(),
            request.options.link_budget,
            request.options.workers,
            if request.options.workers == 1 { "" } else { "s" }
        );
    }

    let seed = request.options.seed.clone();
    let graph = execute_crawl(request.options, None)
        .await
        .with_context(|| format!("crawl of {} failed", seed))?;
    info!("Reporting {} for {}", request.action.as_str(), seed);

    let data = ReportData::from_graph(&graph, request.action);
    match request.output {
        Some(path) => {
            colored::control::set_override(false);
            let content = generate_report(&data, request.format);
            colored::control::unset_override();
            let content = content.context("failed to render report")?;

            save_report(&content, &path)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            if !request.quiet {
                println!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => {
            let content =
                generate_report(&data, request.format).context("failed to render report")?;
            println!("{}", content);
        }
    }

    Ok(())
}
