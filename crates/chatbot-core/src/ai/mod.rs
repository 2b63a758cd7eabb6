pub mod gemini;

use async_trait::async_trait;

use crate::error::ProviderError;

pub use gemini::{GeminiClient, GenerateContentResponse, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// A text-generation backend that answers a single-turn prompt.
#[async_trait]
pub trait GenerateContent: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, ProviderError>;
}
