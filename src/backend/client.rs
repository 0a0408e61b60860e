use super::types::{Content, GenerateContentRequest, GenerateContentResponse};
use super::{GenerativeBackend, ResponseShape};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini REST client for `generateContent`.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Construct a client for one model.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.0-flash`),
    /// not a `models/...`-prefixed path segment.
    pub fn new(api_key: String, model: String, client: Client) -> Self {
        Self::with_timeout(api_key, model, client, Duration::from_secs(120))
    }

    pub fn with_timeout(
        api_key: String,
        model: String,
        client: Client,
        timeout: Duration,
    ) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(
        &self,
        contents: Vec<Content>,
        shape: ResponseShape,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateContentRequest {
            contents,
            generation_config: Some(shape.to_generation_config()),
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(format!("backend call to model {}", self.model))
                } else {
                    tracing::error!("Failed to send request to backend: {}", e);
                    Error::Backend(format!("failed to reach backend: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Backend error (status {}): {}", status, error_text);
            return Err(Error::Backend(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse backend response: {}\nBody: {}", e, body);
            Error::Backend(format!("unparseable backend response: {}", e))
        })
    }
}
