//! Process configuration loaded from the environment
//!
//! All knobs come from env vars (with `.env` support via dotenvy). Required
//! variables fail loudly at startup with a named message.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Output delivery for JSON generation responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Media returned base64-inlined in the JSON body.
    Inline,
    /// Media stored in the artifact cache and returned as a URL.
    Url,
}

impl Delivery {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "inline" => Ok(Delivery::Inline),
            "url" => Ok(Delivery::Url),
            other => Err(Error::Config(format!(
                "invalid delivery mode '{}', expected 'inline' or 'url'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub image_model: String,
    pub text_model: String,
    pub audio_model: String,
    pub bind_addr: String,
    pub public_base_url: String,
    pub artifact_dir: PathBuf,
    pub artifact_ttl: Duration,
    pub sweep_interval: Duration,
    pub admin_token: Option<String>,
    pub default_delivery: Delivery,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_secs(key: &str, default_secs: u64) -> Result<Duration> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| Error::Config(format!("{} must be an integer number of seconds", key))),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let port = env_or("PORT", "3000");
        let bind_addr = env_or("BIND_ADDR", &format!("0.0.0.0:{}", port));
        let public_base_url = env_or("PUBLIC_BASE_URL", &format!("http://localhost:{}", port));

        let artifact_dir = std::env::var("ARTIFACT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("mmgateway-artifacts"));

        let default_delivery = Delivery::parse(&env_or("DEFAULT_DELIVERY", "inline"))?;

        Ok(Self {
            gemini_api_key,
            image_model: env_or("GEMINI_IMAGE_MODEL", "gemini-2.0-flash-preview-image-generation"),
            text_model: env_or("GEMINI_TEXT_MODEL", "gemini-2.0-flash"),
            audio_model: env_or("GEMINI_AUDIO_MODEL", "gemini-2.0-flash"),
            bind_addr,
            public_base_url,
            artifact_dir,
            artifact_ttl: env_secs("ARTIFACT_TTL_SECS", 3600)?,
            sweep_interval: env_secs("SWEEP_INTERVAL_SECS", 60)?,
            admin_token: std::env::var("ADMIN_TOKEN").ok(),
            default_delivery,
        })
    }
}
