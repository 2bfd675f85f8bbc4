//! Request orchestration for caption and image generation.

use crate::ai::{ChatService, ImageGenerationService, OpenAiChatClient, OpenAiImageClient};
use crate::image::{ImageStore, LocalImageStore, PLACEHOLDER_PNG_B64};
use crate::models::{
    Config, ImageGenerationRequest, ImageGenerationResponse, TextGenerationRequest,
    TextGenerationResponse,
};
use crate::prompts;
use crate::{Error, Result};
use tracing::{info, warn};

const PROMPT_REQUIRED: &str = "Prompt is required";

/// Validates requests, shapes prompts, and drives the provider and image store.
pub struct App {
    chat: Box<dyn ChatService>,
    image_gen: Box<dyn ImageGenerationService>,
    store: Box<dyn ImageStore>,
    public_base_url: String,
    mock_images: bool,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub chat: Box<dyn ChatService>,
    pub image_gen: Box<dyn ImageGenerationService>,
    pub store: Box<dyn ImageStore>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, public_base_url: String, mock_images: bool) -> Self {
        Self {
            chat: services.chat,
            image_gen: services.image_gen,
            store: services.store,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            mock_images,
        }
    }

    /// Construct the production app. Creates the images directory up front so
    /// a bad `STATIC_DIR` fails before the server starts accepting requests.
    pub fn new(config: &Config) -> Result<Self> {
        let store = LocalImageStore::new(&config.images_dir())?;

        let api_key = config.openai_api_key.clone().unwrap_or_default();

        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!("Chat model: {}", config.chat_model);
        info!("Image model: {}", config.image_model);
        if config.mock_images {
            info!("MOCK_IMAGES enabled - image requests will not reach the provider");
        }

        Ok(Self::with_services(
            AppServices {
                chat: Box::new(OpenAiChatClient::new_with_client(
                    api_key.clone(),
                    config.chat_model.clone(),
                    http_client.clone(),
                )),
                image_gen: Box::new(OpenAiImageClient::new_with_client(
                    api_key,
                    config.image_model.clone(),
                    http_client,
                )),
                store: Box::new(store),
            },
            config.public_base_url.clone(),
            config.mock_images,
        ))
    }

    pub async fn generate_text(&self, req: &TextGenerationRequest) -> Result<TextGenerationResponse> {
        require_prompt(&req.prompt)?;

        let prompt = prompts::build_caption_prompt(
            &req.prompt,
            req.platform.as_deref(),
            req.tone.as_deref(),
            req.length.as_deref(),
        );
        info!("Generating caption ({} chars of prompt)", prompt.len());

        let text = self.chat.complete_chat(prompts::CAPTION_SYSTEM, &prompt).await?;
        Ok(TextGenerationResponse { text })
    }

    pub async fn generate_image(
        &self,
        req: &ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        require_prompt(&req.prompt)?;

        if self.mock_images {
            return self.persist(PLACEHOLDER_PNG_B64.to_string()).await;
        }

        let size = prompts::map_aspect_to_size(req.aspect_ratio.as_deref());
        let prompt = prompts::add_style_hint(&req.prompt, req.style.as_deref());
        info!("Generating {} image", size);

        match self.image_gen.generate_image(&prompt, size).await {
            Ok(b64) => self.persist(b64).await,
            Err(Error::BillingHardLimit(message)) => {
                warn!("Billing hard limit reached, serving placeholder image: {}", message);
                self.persist(PLACEHOLDER_PNG_B64.to_string()).await
            }
            Err(e) => Err(e),
        }
    }

    async fn persist(&self, b64: String) -> Result<ImageGenerationResponse> {
        let path = self.store.save_image(&b64).await?;
        Ok(ImageGenerationResponse {
            url: format!("{}{}", self.public_base_url, path),
            b64,
        })
    }
}

fn require_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(Error::Validation(PROMPT_REQUIRED.to_string()));
    }
    Ok(())
}
