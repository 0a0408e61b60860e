use super::types::{Candidate, Content, GenerateContentResponse, InlineData, Part};
use super::{GenerativeBackend, ResponseShape};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use std::sync::{Arc, Mutex};

/// In-memory backend for tests: replays queued responses in order.
#[derive(Clone, Default)]
pub struct MockBackend {
    responses: Arc<Mutex<Vec<GenerateContentResponse>>>,
    requests: Arc<Mutex<Vec<Vec<Content>>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: GenerateContentResponse) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Queue a response containing a single text part.
    pub fn with_text_response(self, text: &str) -> Self {
        let text = text.to_string();
        self.with_response(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Content::from_parts(vec![Part::Text { text }]),
            }],
        })
    }

    /// Queue a response containing a single inline media part.
    pub fn with_media_response(self, mime_type: &str, bytes: &[u8]) -> Self {
        self.with_response(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Content::from_parts(vec![Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: base64::engine::general_purpose::STANDARD.encode(bytes),
                    },
                }]),
            }],
        })
    }

    /// Queue a response with no parts at all.
    pub fn with_empty_response(self) -> Self {
        self.with_response(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Content::from_parts(vec![]),
            }],
        })
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Contents of the most recent request, for assertions on composition.
    pub fn last_request(&self) -> Option<Vec<Content>> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn generate(
        &self,
        contents: Vec<Content>,
        _shape: ResponseShape,
    ) -> Result<GenerateContentResponse> {
        self.requests.lock().unwrap().push(contents);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::Backend("mock backend has no queued response".to_string()));
        }
        Ok(responses.remove(0))
    }
}
