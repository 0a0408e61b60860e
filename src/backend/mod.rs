//! Generative backend integration
//!
//! The backend is an opaque collaborator: it accepts an ordered multimodal
//! content sequence plus a response-shape selector and returns typed content
//! parts. A production Gemini client and an in-memory mock implement the
//! same trait.

pub mod client;
pub mod mock;
pub mod types;

pub use client::GeminiClient;
pub use mock::MockBackend;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};

use crate::Result;
use async_trait::async_trait;

/// Selects how the backend should shape its output.
#[derive(Debug, Clone)]
pub enum ResponseShape {
    /// Free-form text plus image parts.
    Multimodal,
    /// Free-form text only.
    Text,
    /// JSON constrained by the given schema.
    Structured(serde_json::Value),
}

impl ResponseShape {
    pub(crate) fn to_generation_config(&self) -> GenerationConfig {
        match self {
            ResponseShape::Multimodal => GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
                response_mime_type: None,
                response_schema: None,
            },
            ResponseShape::Text => GenerationConfig {
                response_modalities: None,
                response_mime_type: None,
                response_schema: None,
            },
            ResponseShape::Structured(schema) => GenerationConfig {
                response_modalities: None,
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema.clone()),
            },
        }
    }
}

/// One backend call per inbound request; retries are caller policy.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(
        &self,
        contents: Vec<Content>,
        shape: ResponseShape,
    ) -> Result<GenerateContentResponse>;
}
