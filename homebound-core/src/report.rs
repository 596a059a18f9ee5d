// Report generation from a finished crawl

use crate::analytics::{Analytics, CrawlSummary};
use colored::Colorize;
use homebound_scanner::CrawlGraph;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Which part of the crawl results to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportAction {
    Summary,
    BrokenLinks,
    OutgoingLinks,
}

impl ReportAction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "summary" => Some(ReportAction::Summary),
            "brokenlinks" => Some(ReportAction::BrokenLinks),
            "outgoinglinks" => Some(ReportAction::OutgoingLinks),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportAction::Summary => "summary",
            ReportAction::BrokenLinks => "brokenlinks",
            ReportAction::OutgoingLinks => "outgoinglinks",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub action: ReportAction,
    pub summary: CrawlSummary,
}

impl ReportData {
    pub fn from_graph(graph: &CrawlGraph, action: ReportAction) -> Self {
        Self {
            action,
            summary: Analytics::new(graph).summary(),
        }
    }
}

pub fn generate_report(data: &ReportData, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(data)),
        ReportFormat::Json => generate_json_report(data),
    }
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();
    let summary = &data.summary;

    report.push_str(RULE);
    report.push('\n');
    report.push_str("                         HOMEBOUND CRAWL REPORT\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    report.push_str(&format!("Start Page:   {}\n", summary.seed));
    report.push_str(&format!("Prefix:       {}\n", summary.prefix));

    match data.action {
        ReportAction::Summary => push_summary(&mut report, summary),
        ReportAction::BrokenLinks => push_broken_links(&mut report, summary),
        ReportAction::OutgoingLinks => {
            push_section(&mut report, "OUTGOING LINKS", summary.external_links.len());
            push_list(&mut report, &summary.external_links);
        }
    }

    report.push('\n');
    report
}

fn push_summary(report: &mut String, summary: &CrawlSummary) {
    report.push_str(&format!("Files Found:  {}\n", summary.unique_pages));
    report.push_str(&format!(
        "Links Seen:   {} of {}\n",
        summary.links_visited, summary.link_budget
    ));
    report.push_str(&format!("Duplicates:   {}\n", summary.duplicates));
    report.push_str(&format!("Broken Links: {}\n", summary.broken_links.len()));

    push_section(report, "EXTERNAL FILES", summary.external_links.len());
    push_list(report, &summary.external_links);

    report.push('\n');
    report.push_str(RULE);
    report.push('\n');
    report.push_str(&format!(
        "{}\n",
        format!("LONGEST PATH DEPTH: {}", summary.max_distance).bold()
    ));
    report.push_str(RULE);
    report.push_str("\n\n");
    push_list(report, &summary.farthest_pages);
    if summary.farthest_path.len() > 1 {
        report.push_str(&format!(
            "\n  Path: {}\n",
            summary.farthest_path.join(" -> ")
        ));
    }

    push_section(report, "CAN'T GET HOME", summary.stranded_links.len());
    push_list(report, &summary.stranded_links);
}

fn push_broken_links(report: &mut String, summary: &CrawlSummary) {
    push_section(report, "BROKEN LINKS", summary.broken_links.len());
    if summary.broken_links.is_empty() {
        report.push_str("  none\n");
        return;
    }
    for broken in &summary.broken_links {
        let parent = if broken.parent.is_empty() {
            "(start page)"
        } else {
            broken.parent.as_str()
        };
        report.push_str(&format!("  {}\n", broken.address.red()));
        report.push_str(&format!("    found on: {}\n", parent));
        report.push_str(&format!("    reason:   {}\n", broken.reason));
    }
}

fn push_section(report: &mut String, title: &str, count: usize) {
    report.push('\n');
    report.push_str(RULE);
    report.push('\n');
    report.push_str(&format!("{}\n", format!("{} ({})", title, count).bold()));
    report.push_str(RULE);
    report.push_str("\n\n");
}

fn push_list(report: &mut String, items: &[String]) {
    if items.is_empty() {
        report.push_str("  none\n");
    }
    for item in items {
        report.push_str(&format!("  {}\n", item));
    }
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let summary = &data.summary;
    let results = match data.action {
        ReportAction::Summary => serde_json::to_value(summary)?,
        ReportAction::BrokenLinks => serde_json::json!({
            "seed": summary.seed,
            "broken_links": summary.broken_links,
        }),
        ReportAction::OutgoingLinks => serde_json::json!({
            "seed": summary.seed,
            "external_links": summary.external_links,
        }),
    };

    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Homebound",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "action": data.action.as_str(),
            },
            "results": results,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
