use super::{ImageStore, IMAGES_URL_PREFIX};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Attempts at a fresh file name before giving up on a colliding timestamp.
const MAX_NAME_ATTEMPTS: u32 = 16;

pub struct LocalImageStore {
    images_dir: PathBuf,
}

impl LocalImageStore {
    /// Create the images directory (and parents) if needed.
    pub fn new(images_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(images_dir)?;
        tracing::info!("Serving images from {}", images_dir.display());
        Ok(Self {
            images_dir: images_dir.to_path_buf(),
        })
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn file_name(at: DateTime<Utc>) -> String {
        format!("ugc_{}.png", at.format("%Y%m%d_%H%M%S_%6f"))
    }

    /// Write `bytes` to a new file named after `at`.
    ///
    /// Existing files are never overwritten: on a name collision the
    /// timestamp moves forward one microsecond and the write is retried.
    async fn write_new(&self, bytes: &[u8], at: DateTime<Utc>) -> Result<String> {
        let mut at = at;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = Self::file_name(at);
            let path = self.images_dir.join(&file_name);

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    tracing::info!("Saved image {} ({} bytes)", path.display(), bytes.len());
                    return Ok(format!("{}/{}", IMAGES_URL_PREFIX, file_name));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!("Image name {} already taken, retrying", file_name);
                    at = at + chrono::Duration::microseconds(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(Error::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!(
                "No free image file name after {} attempts in {}",
                MAX_NAME_ATTEMPTS,
                self.images_dir.display()
            ),
        )))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save_image(&self, b64_data: &str) -> Result<String> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(b64_data)?;
        self.write_new(&bytes, Utc::now()).await
    }
}
