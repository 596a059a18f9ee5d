//! Decides which addresses belong to the crawl.
//!
//! The prefix is matched anywhere in the address, not only at the start, so a
//! prefix of `example.edu` also admits `cs.example.edu`.

use serde::{Deserialize, Serialize};

/// Suffixes at which a seed's host is cut to derive the default prefix.
const PREFIX_SUFFIXES: &[&str] = &[".com", ".edu", ".gov", ".org"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    prefix: String,
    domain_suffix: String,
}

impl Scope {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let domain_suffix = domain_suffix(&prefix).to_string();
        Self {
            prefix,
            domain_suffix,
        }
    }

    /// Scope derived from the seed when the caller supplied no prefix.
    pub fn for_seed(seed: &str) -> Self {
        Self::new(default_prefix(seed))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_in_scope(&self, address: &str) -> bool {
        is_in_scope(address, &self.prefix)
    }

    pub fn is_external(&self, address: &str) -> bool {
        !address.contains(&self.domain_suffix)
    }
}

pub fn is_in_scope(address: &str, prefix: &str) -> bool {
    address.contains(prefix)
}

/// Matches only the part of the prefix after its first `.`, so that
/// `http://www.example.edu` and `https://apps.example.edu` are both internal
/// to a prefix of `www.example.edu`.
pub fn is_external(address: &str, prefix: &str) -> bool {
    !address.contains(domain_suffix(prefix))
}

fn domain_suffix(prefix: &str) -> &str {
    match prefix.split_once('.') {
        Some((_, suffix)) if !suffix.is_empty() => suffix,
        _ => prefix,
    }
}

/// Bare domain of `seed`: scheme dropped, cut at the first `/`, then cut
/// right after the first known top-level suffix.
pub fn default_prefix(seed: &str) -> String {
    let rest = seed
        .strip_prefix("http://")
        .or_else(|| seed.strip_prefix("https://"))
        .unwrap_or(seed);
    let host = match rest.find('/') {
        Some(idx) => &rest[..idx],
        None => rest,
    };
    PREFIX_SUFFIXES
        .iter()
        .find_map(|suffix| host.find(suffix).map(|idx| &host[..idx + suffix.len()]))
        .unwrap_or(host)
        .to_string()
}
