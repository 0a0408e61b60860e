//! Pipeline orchestration
//!
//! One pipeline serves every endpoint variant: assemble the multimodal
//! payload, invoke the backend once, decompose the response. Output shaping
//! and transport live in the HTTP layer.

use crate::analysis::{self, AudioAnalysis};
use crate::artifacts::ArtifactStore;
use crate::assemble::assemble;
use crate::backend::{Content, GeminiClient, GenerativeBackend, ResponseShape};
use crate::config::Config;
use crate::conversation::{self, ConversationTurn};
use crate::decompose::{decompose, GenerationResult};
use crate::media::{classify, HttpMediaFetcher, MediaFetcher, MediaKind, MediaPart};
use crate::{Error, Result};
use std::sync::Arc;

/// Coordinates media fetching, backend invocation, and artifact storage.
pub struct Gateway {
    image_backend: Box<dyn GenerativeBackend>,
    text_backend: Box<dyn GenerativeBackend>,
    audio_backend: Box<dyn GenerativeBackend>,
    fetcher: Box<dyn MediaFetcher>,
    artifacts: Arc<ArtifactStore>,
}

/// Injectable service bundle used to construct [`Gateway`] in tests.
pub struct GatewayServices {
    pub image_backend: Box<dyn GenerativeBackend>,
    pub text_backend: Box<dyn GenerativeBackend>,
    pub audio_backend: Box<dyn GenerativeBackend>,
    pub fetcher: Box<dyn MediaFetcher>,
    pub artifacts: Arc<ArtifactStore>,
}

impl Gateway {
    /// Build a gateway from concrete service dependencies.
    pub fn with_services(services: GatewayServices) -> Self {
        Self {
            image_backend: services.image_backend,
            text_backend: services.text_backend,
            audio_backend: services.audio_backend,
            fetcher: services.fetcher,
            artifacts: services.artifacts,
        }
    }

    /// Construct the production gateway from environment configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across backend clients and fetcher.
        let http_client = reqwest::Client::new();

        let make_backend = |model: &str| -> Box<dyn GenerativeBackend> {
            Box::new(GeminiClient::new(
                config.gemini_api_key.clone(),
                model.to_string(),
                http_client.clone(),
            ))
        };

        let artifacts = Arc::new(ArtifactStore::new(
            config.artifact_dir.clone(),
            config.artifact_ttl,
        )?);

        Ok(Self::with_services(GatewayServices {
            image_backend: make_backend(&config.image_model),
            text_backend: make_backend(&config.text_model),
            audio_backend: make_backend(&config.audio_model),
            fetcher: Box::new(HttpMediaFetcher::new(http_client.clone())),
            artifacts,
        }))
    }

    pub fn artifacts(&self) -> &Arc<ArtifactStore> {
        &self.artifacts
    }

    async fn fetch_media(&self, kind: MediaKind, url: &str) -> Result<MediaPart> {
        // Classification happens before any network I/O so an unsupported
        // format never costs a fetch or a backend call.
        let mime_type = classify(kind, url)
            .ok_or_else(|| Error::UnsupportedFormat(url.to_string()))?
            .to_string();

        let data = self.fetcher.fetch(url).await?;
        Ok(MediaPart { mime_type, data })
    }

    /// Free-form generation: prompt plus optional image reference.
    pub async fn generate(
        &self,
        prompt: &str,
        image_url: Option<&str>,
    ) -> Result<GenerationResult> {
        let media = match image_url {
            Some(url) => Some(self.fetch_media(MediaKind::Image, url).await?),
            None => None,
        };

        let parts = assemble(prompt, media)?;
        let contents = vec![Content::from_parts(parts)];

        let response = self
            .image_backend
            .generate(contents, ResponseShape::Multimodal)
            .await?;

        decompose(&response)
    }

    /// Schema-constrained audio analysis.
    pub async fn analyze_audio(
        &self,
        instruction: Option<&str>,
        audio_url: &str,
    ) -> Result<AudioAnalysis> {
        let media = self.fetch_media(MediaKind::Audio, audio_url).await?;

        let prompt = instruction.unwrap_or(analysis::DEFAULT_INSTRUCTION);
        let parts = assemble(prompt, Some(media))?;
        let contents = vec![Content::from_parts(parts)];

        let response = self
            .audio_backend
            .generate(
                contents,
                ResponseShape::Structured(analysis::response_schema()),
            )
            .await?;

        let result = decompose(&response)?;
        let text = result.text.ok_or(Error::EmptyGeneration)?;

        serde_json::from_str(&text).map_err(|e| {
            Error::Backend(format!("backend JSON does not match analysis schema: {}", e))
        })
    }

    /// One conversational turn: thread history, invoke, extend history.
    pub async fn chat(
        &self,
        history: Vec<ConversationTurn>,
        prompt: &str,
    ) -> Result<(String, Vec<ConversationTurn>)> {
        if prompt.trim().is_empty() {
            return Err(Error::MissingPrompt);
        }

        let contents = conversation::to_contents(&history, prompt);
        let response = self
            .text_backend
            .generate(contents, ResponseShape::Text)
            .await?;

        let result = decompose(&response)?;
        let reply = result.text.ok_or(Error::EmptyGeneration)?;

        let updated = conversation::extend(history, prompt, &reply);
        Ok((reply, updated))
    }
}
