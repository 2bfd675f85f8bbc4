use super::client::OpenAiHttpClient;
use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use crate::ai::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(120);

pub struct OpenAiImageClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: OpenAiHttpClient::new(api_key, TIMEOUT),
            model,
        }
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, TIMEOUT, client),
            model,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageGenerationService for OpenAiImageClient {
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<String> {
        tracing::debug!("Requesting {} image from {}", size, self.model);

        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: size.to_string(),
        };

        let response: ImageGenerationResponse =
            self.http.post("/v1/images/generations", &request).await?;

        let image_data = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No image data in OpenAI response".to_string()))?;

        if let Some(b64_json) = image_data.b64_json {
            Ok(b64_json)
        } else if let Some(url) = image_data.url {
            let bytes = self.http.download(&url).await?;
            Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
        } else {
            Err(Error::AiProvider(
                "No image data (neither base64 nor URL) in response".to_string(),
            ))
        }
    }
}
