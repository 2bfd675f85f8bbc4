use super::{ChatService, ImageGenerationService};
use crate::image::PLACEHOLDER_PNG_B64;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Failure a mock client should report instead of a response.
#[derive(Debug, Clone)]
pub enum MockFailure {
    Provider(String),
    BillingHardLimit(String),
}

impl From<MockFailure> for Error {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::Provider(message) => Error::AiProvider(message),
            MockFailure::BillingHardLimit(message) => Error::BillingHardLimit(message),
        }
    }
}

type Outcome = std::result::Result<String, MockFailure>;

fn next_outcome(outcomes: &[Outcome], call: usize) -> Option<Outcome> {
    if outcomes.is_empty() {
        None
    } else {
        Some(outcomes[(call - 1) % outcomes.len()].clone())
    }
}

pub struct MockChatClient {
    responses: Arc<Mutex<Vec<Outcome>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.responses.lock().unwrap().push(Err(failure));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `(system_prompt, user_prompt)` pairs in call order.
    pub fn get_requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete_chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((system_prompt.to_string(), user_prompt.to_string()));
            requests.len()
        };

        let responses = self.responses.lock().unwrap();
        match next_outcome(&responses, call) {
            Some(outcome) => outcome.map_err(Error::from),
            None => Ok("Mock caption ✨".to_string()),
        }
    }
}

pub struct MockImageGenerationClient {
    responses: Arc<Mutex<Vec<Outcome>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image_response(self, b64: String) -> Self {
        self.responses.lock().unwrap().push(Ok(b64));
        self
    }

    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.responses.lock().unwrap().push(Err(failure));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `(prompt, size)` pairs in call order.
    pub fn get_requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<String> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((prompt.to_string(), size.to_string()));
            requests.len()
        };

        let responses = self.responses.lock().unwrap();
        match next_outcome(&responses, call) {
            Some(outcome) => outcome.map_err(Error::from),
            None => Ok(PLACEHOLDER_PNG_B64.to_string()),
        }
    }
}
