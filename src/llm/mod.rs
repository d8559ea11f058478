//! Generative text backends behind the `LlmProvider` trait.
//!
//! The pitch engine talks to this seam only, so any OpenAI-compatible
//! service can be plugged in without touching the generation code.

mod openai;
mod provider;
mod types;

pub use openai::{ApiKeySource, OpenAIProvider};
pub use provider::{CompletionOptions, LlmError, LlmProvider};
pub use types::{CompletionResponse, FinishReason, Message, MessageRole, TokenUsage};

#[cfg(feature = "mock")]
pub use provider::MockLlmProvider;
