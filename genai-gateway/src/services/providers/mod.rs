//! Model provider abstraction.
//!
//! The gateway talks to the external model only through [`ModelProvider`],
//! so handlers can be exercised against [`mock::MockModelProvider`] without
//! any network dependency.

pub mod gemini;
pub mod mock;

use crate::models::ModelRequest;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content blocked: {0}")]
    ContentBlocked(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Text extracted from a model reply, plus what is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub text: String,

    /// Input tokens consumed, when reported.
    pub input_tokens: Option<i32>,

    /// Output tokens generated, when reported.
    pub output_tokens: Option<i32>,

    /// Raw finish reason, when reported.
    pub finish_reason: Option<String>,
}

impl ProviderResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            input_tokens: None,
            output_tokens: None,
            finish_reason: None,
        }
    }
}

/// A generative model that turns a request into text.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Submit one request. Exactly one outbound call; no retries.
    async fn generate(&self, request: &ModelRequest) -> Result<ProviderResponse, ProviderError>;

    /// Whether the provider is able to serve requests.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
