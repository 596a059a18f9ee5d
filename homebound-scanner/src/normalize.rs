//! Turns raw `href` values into canonical absolute addresses.
//!
//! A canonical address always carries an `http` or `https` scheme and never
//! carries a fragment. Absolute links are kept as written so that an address
//! which is already canonical normalizes to itself.

use crate::error::RejectedLink;
use url::Url;

/// Pseudo-schemes that never point at a crawlable page.
const PSEUDO_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Extensions of source files that are linked to but are not pages.
const SOURCE_EXTENSIONS: &[&str] = &[
    ".java", ".class", ".jar", ".js", ".css", ".c", ".cpp", ".h", ".py", ".rs",
];

/// Top-level suffixes that mark a scheme-less link as a bare domain rather
/// than a relative path.
pub const DOMAIN_SUFFIXES: &[&str] = &[
    ".com", ".edu", ".gov", ".org", ".net", ".io", ".us", ".uk", ".info",
];

/// Normalize `raw`, found on the page at `host`, into a canonical address.
///
/// Relative links are resolved against `host` using standard URL resolution.
pub fn normalize(raw: &str, host: &str) -> Result<String, RejectedLink> {
    let link = raw.trim();
    if link.is_empty() {
        return Err(RejectedLink::Empty);
    }
    if link.starts_with('#') {
        return Err(RejectedLink::Fragment);
    }
    if let Some(scheme) = pseudo_scheme(link) {
        return Err(RejectedLink::Scheme(scheme));
    }

    let link = strip_fragment(link);
    if link.is_empty() {
        return Err(RejectedLink::Fragment);
    }

    let address = if link.starts_with("//") {
        format!("http:{}", link)
    } else if has_http_scheme(link) {
        link.to_string()
    } else if looks_like_domain(link) {
        format!("http://{}", link)
    } else {
        resolve_relative(link, host)?
    };

    let parsed = Url::parse(&address)
        .map_err(|e| RejectedLink::Malformed(format!("{}: {}", address, e)))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(RejectedLink::Scheme(other.to_string())),
    }
    if is_source_file(parsed.path()) {
        return Err(RejectedLink::SourceFile);
    }

    Ok(address)
}

fn pseudo_scheme(link: &str) -> Option<String> {
    let lower = link.to_ascii_lowercase();
    PSEUDO_SCHEMES
        .iter()
        .find(|scheme| lower.starts_with(*scheme))
        .map(|scheme| scheme.trim_end_matches(':').to_string())
}

fn strip_fragment(link: &str) -> &str {
    match link.split_once('#') {
        Some((before, _)) => before,
        None => link,
    }
}

fn has_http_scheme(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// `www.example.edu/people` is a domain with the scheme left off, while
/// `people/index.html` is a path.
fn looks_like_domain(link: &str) -> bool {
    let segment = link.split(['/', '?']).next().unwrap_or_default();
    let host = match segment.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => segment,
    };
    if host.is_empty() || host.starts_with('.') {
        return false;
    }
    let host = host.to_ascii_lowercase();
    DOMAIN_SUFFIXES.iter().any(|suffix| host.ends_with(suffix))
}

fn resolve_relative(link: &str, host: &str) -> Result<String, RejectedLink> {
    let base = Url::parse(host)
        .map_err(|e| RejectedLink::Malformed(format!("host page {}: {}", host, e)))?;
    let mut resolved = base
        .join(link)
        .map_err(|e| RejectedLink::Malformed(format!("{}: {}", link, e)))?;
    resolved.set_fragment(None);
    Ok(resolved.to_string())
}

fn is_source_file(path: &str) -> bool {
    let path = path.to_ascii_lowercase();
    SOURCE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
