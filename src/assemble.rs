//! Content assembly for backend requests
//!
//! Builds the ordered part sequence the backend treats as a single
//! instruction context: text first, then zero-or-one inline media part.

use crate::backend::{InlineData, Part};
use crate::media::MediaPart;
use crate::{Error, Result};
use base64::Engine as _;

/// Assemble a request payload from a prompt and optional media.
///
/// The prompt is the single required field across all call shapes; an empty
/// or whitespace-only prompt is rejected before anything else happens.
pub fn assemble(prompt: &str, media: Option<MediaPart>) -> Result<Vec<Part>> {
    if prompt.trim().is_empty() {
        return Err(Error::MissingPrompt);
    }

    let mut parts = vec![Part::Text {
        text: prompt.to_string(),
    }];

    if let Some(media) = media {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: media.mime_type,
                data: base64::engine::general_purpose::STANDARD.encode(&media.data),
            },
        });
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_text_only_is_single_part() {
        let parts = assemble("a red circle on white background", None).unwrap();

        assert_eq!(parts.len(), 1);
        match &parts[0] {
            Part::Text { text } => assert_eq!(text, "a red circle on white background"),
            _ => panic!("expected text part"),
        }
    }

    #[test]
    fn test_assemble_with_media_is_text_then_inline() {
        let media = MediaPart {
            mime_type: "audio/wav".to_string(),
            data: vec![1, 2, 3],
        };
        let parts = assemble("transcribe this", Some(media)).unwrap();

        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[0], Part::Text { .. }));
        match &parts[1] {
            Part::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "audio/wav");
                assert_eq!(
                    base64::engine::general_purpose::STANDARD
                        .decode(&inline_data.data)
                        .unwrap(),
                    vec![1, 2, 3]
                );
            }
            _ => panic!("expected inline data part"),
        }
    }

    #[test]
    fn test_assemble_rejects_empty_prompt() {
        assert!(matches!(assemble("", None), Err(Error::MissingPrompt)));
        assert!(matches!(assemble("   ", None), Err(Error::MissingPrompt)));
    }

    #[test]
    fn test_assemble_rejects_empty_prompt_even_with_media() {
        let media = MediaPart {
            mime_type: "image/png".to_string(),
            data: vec![0x89],
        };
        assert!(matches!(
            assemble("", Some(media)),
            Err(Error::MissingPrompt)
        ));
    }
}
