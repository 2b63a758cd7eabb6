pub mod ai;
pub mod chat;
pub mod config;
pub mod error;
pub mod state;

// Re-export main types for convenience
pub use ai::{GeminiClient, GenerateContent, GenerateContentResponse};
pub use chat::{ChatScreen, FAILURE_FALLBACK, GREETING, NO_RESPONSE_FALLBACK};
pub use config::Config;
pub use error::ProviderError;
pub use state::{ChatMessage, ChatRole, ChatState};
