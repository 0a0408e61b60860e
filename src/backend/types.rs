//! Gemini `generateContent` wire types shared across request kinds.

use serde::{Deserialize, Serialize};

/// Content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    /// A role-less content block (single-shot requests).
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self { role: None, parts }
    }

    /// A role-tagged turn (conversational requests).
    pub fn turn(role: &str, text: String) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part::Text { text }],
        }
    }
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload for media in requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Request envelope for `generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_serializes_text_and_inline_data() {
        let text = serde_json::to_value(Part::Text {
            text: "hello".to_string(),
        })
        .unwrap();
        assert_eq!(text, serde_json::json!({ "text": "hello" }));

        let inline = serde_json::to_value(Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/png".to_string(),
                data: "aGk=".to_string(),
            },
        })
        .unwrap();
        assert_eq!(
            inline,
            serde_json::json!({ "inlineData": { "mimeType": "image/png", "data": "aGk=" } })
        );
    }

    #[test]
    fn test_response_deserializes_mixed_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "a caption" },
                        { "inlineData": { "mimeType": "image/png", "data": "aGk=" } }
                    ]
                }
            }]
        }))
        .unwrap();

        let parts = &response.candidates[0].content.parts;
        assert!(matches!(parts[0], Part::Text { .. }));
        assert!(matches!(parts[1], Part::InlineData { .. }));
    }

    #[test]
    fn test_response_tolerates_missing_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn test_generation_config_omits_unset_fields() {
        let config = GenerationConfig {
            response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
            response_mime_type: None,
            response_schema: None,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "responseModalities": ["TEXT", "IMAGE"] })
        );
    }
}
