//! AI service integration for caption and image generation
//!
//! Provides interfaces to OpenAI's Chat Completions and Image APIs. The
//! traits are the seam the HTTP layer depends on, so tests swap in mocks.

pub mod mock;
pub mod openai;

pub use mock::{MockChatClient, MockImageGenerationClient};
pub use openai::{OpenAiChatClient, OpenAiImageClient};

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Run one system + user exchange and return the trimmed reply.
    async fn complete_chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate an image and return it base64-encoded.
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<String>;
}

#[async_trait]
impl<T: ChatService + ?Sized> ChatService for Arc<T> {
    async fn complete_chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        (**self).complete_chat(system_prompt, user_prompt).await
    }
}

#[async_trait]
impl<T: ImageGenerationService + ?Sized> ImageGenerationService for Arc<T> {
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<String> {
        (**self).generate_image(prompt, size).await
    }
}
