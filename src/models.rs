//! Data models and structures
//!
//! Defines the request/response records exchanged with the front-end and the
//! service configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextGenerationRequest {
    #[serde(default)]
    pub prompt: String,
    pub platform: Option<String>,
    pub tone: Option<String>,
    /// "short" | "medium" | "long"
    pub length: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextGenerationResponse {
    pub text: String,
}

fn default_aspect_ratio() -> Option<String> {
    Some("square".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    #[serde(default)]
    pub prompt: String,
    /// "selfie" | "product" | "demo"
    pub style: Option<String>,
    /// "square" | "portrait" | "landscape"
    #[serde(rename = "aspectRatio", default = "default_aspect_ratio")]
    pub aspect_ratio: Option<String>,
}

impl Default for ImageGenerationRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            style: None,
            aspect_ratio: default_aspect_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageGenerationResponse {
    pub url: String,
    pub b64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub chat_model: String,
    pub image_model: String,
    pub mock_images: bool,
    pub static_dir: PathBuf,
    pub public_base_url: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        if openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set; provider calls will fail until it is configured");
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| crate::Error::Config(format!("Invalid PORT '{}'", raw)))?,
            None => 8000,
        };

        Ok(Self {
            openai_api_key,
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            image_model: lookup("IMAGE_MODEL").unwrap_or_else(|| "gpt-image-1".to_string()),
            mock_images: parse_flag(lookup("MOCK_IMAGES").as_deref()),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            public_base_url: lookup("PUBLIC_BASE_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string())
                .trim_end_matches('/')
                .to_string(),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
        })
    }

    pub fn images_dir(&self) -> PathBuf {
        self.static_dir.join("images")
    }
}

/// Only a case-insensitive "true" enables a flag.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
