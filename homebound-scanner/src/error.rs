use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Why a single page could not be fetched. Recorded against the broken link,
/// never fatal to the crawl.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// A raw link the normalizer refused to turn into an address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectedLink {
    #[error("empty link")]
    Empty,

    #[error("same-page fragment")]
    Fragment,

    #[error("unsupported scheme: {0}")]
    Scheme(String),

    #[error("links to a source file")]
    SourceFile,

    #[error("cannot resolve link: {0}")]
    Malformed(String),
}
