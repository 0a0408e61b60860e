use super::MediaFetcher;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// HTTP media fetcher with a bounded per-request timeout.
pub struct HttpMediaFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpMediaFetcher {
    pub fn new(client: Client) -> Self {
        Self::with_timeout(client, Duration::from_secs(30))
    }

    pub fn with_timeout(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl MediaFetcher for HttpMediaFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Fetching media from {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(format!("media fetch from {}", url))
                } else {
                    Error::Fetch(format!("failed to fetch {}: {}", url, e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Media fetch failed (status {}): {}", status, url);
            return Err(Error::Fetch(format!(
                "fetching {} returned status {}",
                url, status
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(format!("media fetch from {}", url))
            } else {
                Error::Fetch(format!("failed to read body from {}: {}", url, e))
            }
        })?;

        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
