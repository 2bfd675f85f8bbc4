use super::{ImageStore, IMAGES_URL_PREFIX};
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockImageStore {
    saved: Arc<Mutex<Vec<String>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageStore {
    pub fn new() -> Self {
        Self {
            saved: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    /// Base64 payloads in the order they were saved.
    pub fn get_saved(&self) -> Vec<String> {
        self.saved.lock().unwrap().clone()
    }
}

impl Default for MockImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for MockImageStore {
    async fn save_image(&self, b64_data: &str) -> Result<String> {
        if *self.should_fail.lock().unwrap() {
            return Err(crate::Error::Io(std::io::Error::other("Mock failure")));
        }

        let mut saved = self.saved.lock().unwrap();
        saved.push(b64_data.to_string());
        Ok(format!("{}/mock_{}.png", IMAGES_URL_PREFIX, saved.len()))
    }
}
