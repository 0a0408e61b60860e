//! Response decomposition
//!
//! Splits a heterogeneous backend response into at most one text component
//! and at most one binary media component.

use crate::backend::{GenerateContentResponse, Part};
use crate::media::MediaPart;
use crate::{Error, Result};
use base64::Engine as _;

/// What a generation produced. At least one field is always `Some`; a
/// response with neither is a backend failure, never an empty success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: Option<String>,
    pub media: Option<MediaPart>,
}

/// Decompose a backend response into text and media components.
///
/// The first text part wins and the first inline-data part wins; later parts
/// of the same kind are ignored. Pure function of the response, so repeated
/// calls yield identical results.
pub fn decompose(response: &GenerateContentResponse) -> Result<GenerationResult> {
    let mut text = None;
    let mut media = None;

    let parts = response
        .candidates
        .first()
        .map(|c| c.content.parts.as_slice())
        .unwrap_or(&[]);

    for part in parts {
        match part {
            Part::Text { text: t } if text.is_none() => text = Some(t.clone()),
            Part::InlineData { inline_data } if media.is_none() => {
                let data = base64::engine::general_purpose::STANDARD
                    .decode(&inline_data.data)
                    .map_err(|e| {
                        Error::Backend(format!("undecodable inline data in response: {}", e))
                    })?;
                media = Some(MediaPart {
                    mime_type: inline_data.mime_type.clone(),
                    data,
                });
            }
            _ => {}
        }
    }

    if text.is_none() && media.is_none() {
        return Err(Error::EmptyGeneration);
    }

    Ok(GenerationResult { text, media })
}
