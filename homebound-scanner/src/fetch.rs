use crate::error::{FetchError, Result};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Retrieves page content for a normalized address.
///
/// Implementations are treated as unreliable: every failure is reported as a
/// [`FetchError`] and the crawler never retries.
pub trait Fetcher: Send + Sync {
    fn fetch(
        &self,
        address: &str,
    ) -> impl Future<Output = std::result::Result<String, FetchError>> + Send;
}

/// [`Fetcher`] backed by a pooled `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs.max(1));
        let client = Client::builder()
            .user_agent(concat!(
                "Homebound/",
                env!("CARGO_PKG_VERSION"),
                " (https://github.com/trapdoorsec/homebound)"
            ))
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> std::result::Result<String, FetchError> {
        debug!("Fetching {}", address);

        let response = self.client.get(address).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
