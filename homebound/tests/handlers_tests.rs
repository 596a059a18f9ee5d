use homebound::handlers::*;
use homebound::{command_argument_builder, extract_url_path};
use homebound_core::report::{ReportAction, ReportFormat};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn request_from(args: &[&str]) -> anyhow::Result<CrawlRequest> {
    let mut argv = vec!["homebound"];
    argv.extend_from_slice(args);
    let matches = command_argument_builder().try_get_matches_from(argv)?;
    crawl_request_from_matches(&matches)
}

#[test]
fn test_parse_url_line_with_scheme() {
    let result = parse_url_line("https://example.com");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_without_scheme() {
    let result = parse_url_line("example.com");
    assert_eq!(result, Some("http://example.com".to_string()));
}

#[test]
fn test_parse_url_line_host_with_port() {
    let result = parse_url_line("localhost:8080/start");
    assert_eq!(result, Some("http://localhost:8080/start".to_string()));
}

#[test]
fn test_parse_url_line_invalid() {
    assert_eq!(parse_url_line("not a valid url!!!"), None);
    assert_eq!(parse_url_line("   "), None);
    assert_eq!(parse_url_line("ftp://example.com/file"), None);
}

#[test]
fn test_extract_url_path() {
    assert_eq!(extract_url_path("https://example.com/dept/people"), "/dept/people");
    assert_eq!(extract_url_path("https://example.com/"), "/");
    assert_eq!(extract_url_path("https://example.com"), "/");
}

#[test]
fn test_request_defaults() {
    let request = request_from(&["www.example.edu"]).unwrap();

    assert_eq!(request.options.seed, "http://www.example.edu");
    assert_eq!(request.options.prefix, None);
    assert_eq!(request.options.link_budget, 1000);
    assert_eq!(request.options.workers, 1);
    assert_eq!(request.options.delay, Duration::from_millis(500));
    assert_eq!(request.options.timeout_secs, 10);
    assert!(request.options.show_progress_bars);
    assert_eq!(request.action, ReportAction::Summary);
    assert_eq!(request.format, ReportFormat::Text);
    assert_eq!(request.output, None);
    assert!(!request.quiet);
}

#[test]
fn test_request_all_flags() {
    let request = request_from(&[
        "https://www.example.edu/",
        "--linklimit",
        "50",
        "--searchprefix",
        "example.edu",
        "--action",
        "brokenlinks",
        "-t",
        "4",
        "--delay",
        "0",
        "--timeout",
        "3",
        "-f",
        "json",
        "-o",
        "report.json",
        "-q",
    ])
    .unwrap();

    assert_eq!(request.options.seed, "https://www.example.edu/");
    assert_eq!(request.options.prefix.as_deref(), Some("example.edu"));
    assert_eq!(request.options.link_budget, 50);
    assert_eq!(request.options.workers, 4);
    assert_eq!(request.options.delay, Duration::ZERO);
    assert_eq!(request.options.timeout_secs, 3);
    assert!(!request.options.show_progress_bars);
    assert_eq!(request.action, ReportAction::BrokenLinks);
    assert_eq!(request.format, ReportFormat::Json);
    assert_eq!(request.output, Some(PathBuf::from("report.json")));
    assert!(request.quiet);
}

#[test]
fn test_request_zero_threads_means_one_worker() {
    let request = request_from(&["http://a.edu", "--threads", "0"]).unwrap();
    assert_eq!(request.options.workers, 1);
}

#[test]
fn test_request_unusable_seed() {
    assert!(request_from(&["ftp://a.edu/"]).is_err());
}

#[test]
fn test_usage_errors() {
    // Missing URL
    assert!(command_argument_builder().try_get_matches_from(["homebound"]).is_err());
    // Unknown action
    assert!(
        command_argument_builder()
            .try_get_matches_from(["homebound", "http://a.edu", "--action", "sitemap"])
            .is_err()
    );
    // Non-numeric limit
    assert!(
        command_argument_builder()
            .try_get_matches_from(["homebound", "http://a.edu", "--linklimit", "lots"])
            .is_err()
    );
}

#[tokio::test]
async fn test_handle_crawl_writes_report() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/dead">dead</a><a href="http://external.com">out</a>"#),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("broken.json");
    let seed = format!("{}/", mock_server.uri());
    let output_arg = output.to_string_lossy().to_string();
    let matches = command_argument_builder()
        .try_get_matches_from([
            "homebound",
            seed.as_str(),
            "--action",
            "brokenlinks",
            "--delay",
            "0",
            "-f",
            "json",
            "-o",
            output_arg.as_str(),
            "-q",
        ])
        .unwrap();

    handle_crawl(&matches).await.unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let broken = &report["report"]["results"]["broken_links"];
    assert_eq!(broken.as_array().unwrap().len(), 1);
    assert_eq!(broken[0]["address"], format!("{}/dead", mock_server.uri()));
    assert_eq!(broken[0]["parent"], seed);
    assert_eq!(broken[0]["reason"], "HTTP 404");
}

#[tokio::test]
async fn test_handle_crawl_unwritable_output() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("missing").join("report.txt");
    let seed = format!("{}/", mock_server.uri());
    let output_arg = output.to_string_lossy().to_string();
    let matches = command_argument_builder()
        .try_get_matches_from([
            "homebound",
            seed.as_str(),
            "--delay",
            "0",
            "-o",
            output_arg.as_str(),
            "-q",
        ])
        .unwrap();

    let err = handle_crawl(&matches).await.unwrap_err();
    assert!(err.to_string().contains("failed to write report"));
}
