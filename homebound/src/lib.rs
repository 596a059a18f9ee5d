pub mod commands;

// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use commands::command_argument_builder;
pub use handlers::{
    CrawlRequest, crawl_request_from_matches, handle_crawl, init_tracing, parse_url_line,
};

// Re-export crawl functionality from homebound-core
pub use homebound_core::crawl::{CrawlOptions, execute_crawl, extract_url_path};
