//! Backend for the AI UGC creator - proxies caption and image generation
//!
//! Shapes prompts for user-generated-content style captions and images, calls
//! the OpenAI APIs on behalf of the front-end, and serves the generated images
//! as static files.

pub mod ai;
pub mod app;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
