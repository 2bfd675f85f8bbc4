//! Persistence of generated images
//!
//! Decodes base64 image payloads and writes them under the static images
//! directory so they can be served back to the front-end.

pub mod mock;
pub mod store;

pub use mock::MockImageStore;
pub use store::LocalImageStore;

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// URL path the images directory is served under.
pub const IMAGES_URL_PREFIX: &str = "/static/images";

/// 1x1 transparent PNG used in mock mode and as the billing-limit fallback.
pub const PLACEHOLDER_PNG_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mP8/x8AAwMBCd3pF1kAAAAASUVORK5CYII=";

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Decode and persist `b64_data`, returning the URL path it is served at.
    async fn save_image(&self, b64_data: &str) -> Result<String>;
}

#[async_trait]
impl<T: ImageStore + ?Sized> ImageStore for Arc<T> {
    async fn save_image(&self, b64_data: &str) -> Result<String> {
        (**self).save_image(b64_data).await
    }
}
