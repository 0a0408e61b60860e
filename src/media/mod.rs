//! Remote media retrieval and MIME classification
//!
//! Fetches raw bytes from user-supplied URLs and classifies them into the
//! MIME types the backend accepts for inline data.

pub mod fetcher;
pub mod mock;

pub use fetcher::HttpMediaFetcher;
pub use mock::MockMediaFetcher;

use crate::Result;
use async_trait::async_trait;

/// A single piece of binary media plus its MIME type.
///
/// Produced by the fetcher (or decomposed from a backend response) and
/// consumed exactly once; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// What kind of media a URL is expected to reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

/// Classify a media identifier (URL or filename) into a MIME type.
///
/// Audio is mapped through a fixed extension table; images are always sent
/// as `image/png` regardless of source extension. Returns `None` for audio
/// extensions outside the table, which callers surface as an unsupported
/// format before any backend call happens.
pub fn classify(kind: MediaKind, identifier: &str) -> Option<&'static str> {
    match kind {
        MediaKind::Image => Some("image/png"),
        MediaKind::Audio => {
            let lower = identifier.to_ascii_lowercase();
            // Strip query string before looking at the extension.
            let path = lower.split('?').next().unwrap_or(&lower);
            let ext = path.rsplit('.').next()?;
            match ext {
                "wav" => Some("audio/wav"),
                "mp3" => Some("audio/mp3"),
                "aiff" => Some("audio/aiff"),
                "aac" => Some("audio/aac"),
                "ogg" => Some("audio/ogg"),
                "flac" => Some("audio/flac"),
                _ => None,
            }
        }
    }
}
