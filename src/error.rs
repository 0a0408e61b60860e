//! Error handling and custom error types
//!
//! Provides unified error handling across the gateway using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("prompt is required and must be non-empty")]
    MissingPrompt,

    #[error("unsupported media format: {0}")]
    UnsupportedFormat(String),

    #[error("media fetch error: {0}")]
    Fetch(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("backend returned no usable content")]
    EmptyGeneration,

    #[error("artifact not found: {0}")]
    NotFound(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
