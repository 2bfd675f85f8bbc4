pub mod chat;
pub mod client;
pub mod image;
pub mod types;

pub use chat::OpenAiChatClient;
pub use image::OpenAiImageClient;

/// Billing error code OpenAI returns once an account's hard limit is hit.
pub const BILLING_HARD_LIMIT_CODE: &str = "billing_hard_limit_reached";
