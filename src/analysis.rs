//! Schema-constrained audio analysis output
//!
//! The audio endpoint asks the backend for JSON matching a fixed schema and
//! parses the reply into these types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioAnalysis {
    pub transcript: String,
    pub summary: String,
    pub sentiment: Sentiment,
    pub speaker: Speaker,
    pub key_topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentiment {
    pub overall: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speaker {
    pub pace: String,
    pub clarity: String,
    pub emotion: String,
}

/// Default instruction sent when the caller supplies no prompt of their own.
pub const DEFAULT_INSTRUCTION: &str =
    "Analyze this audio recording. Transcribe it, summarize it, and assess \
     sentiment, speaker delivery, and the key topics discussed.";

/// Response schema for the audio-analysis shape, in the backend's
/// schema dialect (uppercase type names).
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "transcript": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "sentiment": {
                "type": "OBJECT",
                "properties": {
                    "overall": { "type": "STRING" },
                    "confidence": { "type": "NUMBER" }
                },
                "required": ["overall", "confidence"]
            },
            "speaker": {
                "type": "OBJECT",
                "properties": {
                    "pace": { "type": "STRING" },
                    "clarity": { "type": "STRING" },
                    "emotion": { "type": "STRING" }
                },
                "required": ["pace", "clarity", "emotion"]
            },
            "keyTopics": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["transcript", "summary", "sentiment", "speaker", "keyTopics"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_round_trips_camel_case() {
        let json = serde_json::json!({
            "transcript": "hello there",
            "summary": "a greeting",
            "sentiment": { "overall": "positive", "confidence": 0.92 },
            "speaker": { "pace": "moderate", "clarity": "clear", "emotion": "calm" },
            "keyTopics": ["greetings"]
        });

        let analysis: AudioAnalysis = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(analysis.key_topics, vec!["greetings"]);
        assert_eq!(serde_json::to_value(&analysis).unwrap(), json);
    }

    #[test]
    fn test_schema_covers_every_top_level_field() {
        let schema = response_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in ["transcript", "summary", "sentiment", "speaker", "keyTopics"] {
            assert!(properties.contains_key(field), "missing {}", field);
        }
    }
}
