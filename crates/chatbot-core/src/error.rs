//! Errors raised while talking to the generation API

use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network, TLS or connection failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status from the API
    #[error("Gemini API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Body was not a generateContent response
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The background task running the call died
    #[error("Request task failed: {0}")]
    Task(String),
}
