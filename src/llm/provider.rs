//! Provider seam for generative text services.

use super::types::{CompletionResponse, Message};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Knobs for a single completion call.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    /// Sampling temperature; higher is more varied.
    pub temperature: f32,
    /// Cap on generated tokens, if any.
    pub max_tokens: Option<u32>,
    /// How long to wait for the backend before giving up.
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: Some(1024),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Ways a provider call can fail.
///
/// The engine never surfaces these to its caller; they select the fallback
/// path and show up in logs.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("could not reach the service: {0}")]
    Connection(String),

    #[error("service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unusable response from the service: {0}")]
    InvalidResponse(String),

    #[error("rate limited by the service")]
    RateLimited,

    #[error("request timed out")]
    Timeout,
}

/// A generative text backend.
///
/// One implementor ships in this crate (`OpenAIProvider`); a backend speaking
/// some other protocol implements this trait outside the engine and plugs in
/// the same way.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short name identifying the backend kind, for logs.
    fn name(&self) -> &str;

    /// The model this provider requests.
    fn model(&self) -> &str;

    /// Run one completion over the given conversation.
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError>;

    /// Probe whether the backend is reachable.
    async fn health_check(&self) -> Result<(), LlmError>;
}
