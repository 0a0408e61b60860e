use super::MediaFetcher;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory fetcher for tests: serves canned bytes keyed by URL.
#[derive(Clone, Default)]
pub struct MockMediaFetcher {
    responses: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockMediaFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, url: &str, bytes: Vec<u8>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), bytes);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl MediaFetcher for MockMediaFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        *self.call_count.lock().unwrap() += 1;

        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Fetch(format!("no mock response for {}", url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_canned_bytes() {
        let fetcher = MockMediaFetcher::new().with_response("http://x/a.wav", vec![1, 2, 3]);

        assert_eq!(fetcher.fetch("http://x/a.wav").await.unwrap(), vec![1, 2, 3]);
        assert_eq!(fetcher.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_unknown_url_is_fetch_error() {
        let err = MockMediaFetcher::new()
            .fetch("http://x/missing")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
