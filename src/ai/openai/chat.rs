use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use crate::ai::ChatService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const TEMPERATURE: f64 = 0.8;
const MAX_TOKENS: u32 = 220;
const TIMEOUT: Duration = Duration::from_secs(30);

pub struct OpenAiChatClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiChatClient {
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
impl ChatService for OpenAiChatClient {
    async fn complete_chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self.http.chat_completion(&request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No response from OpenAI chat API".to_string()))?;

        Ok(choice
            .message
            .content
            .map(|text| text.trim().to_string())
            .unwrap_or_default())
    }
}
