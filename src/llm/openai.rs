//! Client for OpenAI-compatible chat-completions APIs.
//!
//! Anything exposing the OpenAI wire format works: OpenAI itself, OpenRouter,
//! Together AI, a local vLLM instance, and so on.

use super::provider::{CompletionOptions, LlmError, LlmProvider};
use super::types::{CompletionResponse, FinishReason, Message, TokenUsage};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// How long an `api_key_command` may run before the call is abandoned.
const KEY_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the bearer token for the service comes from.
#[derive(Debug, Clone)]
pub enum ApiKeySource {
    /// Unauthenticated (local backends).
    None,
    /// A fixed key from configuration.
    Static(String),
    /// A shell command whose stdout is the key. Re-run on every request, so
    /// rotating tokens stay fresh.
    Command(String),
}

impl ApiKeySource {
    async fn resolve(&self) -> Result<Option<String>, LlmError> {
        match self {
            ApiKeySource::None => Ok(None),
            ApiKeySource::Static(key) => Ok(Some(key.clone())),
            ApiKeySource::Command(cmd) => run_key_command(cmd).await.map(Some),
        }
    }
}

/// Run a key command through `sh -c` and return its trimmed stdout.
async fn run_key_command(cmd: &str) -> Result<String, LlmError> {
    debug!(command = %cmd, "Resolving API key via command");

    let output = tokio::time::timeout(
        KEY_COMMAND_TIMEOUT,
        tokio::process::Command::new("sh").arg("-c").arg(cmd).output(),
    )
    .await
    .map_err(|_| {
        warn!(command = %cmd, "api_key_command ran past its deadline");
        LlmError::Timeout
    })?
    .map_err(|e| {
        warn!(command = %cmd, error = %e, "api_key_command could not be spawned");
        LlmError::Connection(format!("failed to run api_key_command: {}", e))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(command = %cmd, stderr = %stderr, "api_key_command exited with failure");
        return Err(LlmError::Connection(format!(
            "api_key_command exited with {}: {}",
            output.status, stderr
        )));
    }

    let key = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if key.is_empty() {
        warn!(command = %cmd, "api_key_command printed nothing");
        return Err(LlmError::Connection(
            "api_key_command produced an empty key".to_string(),
        ));
    }
    Ok(key)
}

/// `LlmProvider` over the OpenAI chat-completions protocol.
pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key_source: ApiKeySource,
}

impl OpenAIProvider {
    /// Provider authenticated with a static key, or unauthenticated.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self::with_key_source(
            base_url,
            model,
            match api_key {
                Some(key) => ApiKeySource::Static(key),
                None => ApiKeySource::None,
            },
        )
    }

    /// Provider with an explicit key source.
    pub fn with_key_source(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key_source: ApiKeySource,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key_source,
        }
    }

    /// Attach bearer auth to a request if a key is configured.
    async fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, LlmError> {
        Ok(match self.api_key_source.resolve().await? {
            Some(key) => builder.header("Authorization", format!("Bearer {}", key)),
            None => builder,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: messages.iter().map(ChatRequestMessage::from).collect(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        debug!(
            model = %self.model,
            messages = messages.len(),
            "Requesting chat completion"
        );

        let builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(options.timeout)
            .json(&request);

        let response = self
            .authorize(builder)
            .await?
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("bad completion payload: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("completion had no choices".to_string()))?;

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("length") => FinishReason::MaxTokens,
            _ => FinishReason::Stop,
        };
        debug!(finish_reason = ?finish_reason, "Chat completion received");

        Ok(CompletionResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            finish_reason,
            usage: parsed.usage.map(ChatUsage::into_usage),
        })
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        let builder = self
            .client
            .get(format!("{}/models", self.base_url))
            .timeout(std::time::Duration::from_secs(5));

        let response = self
            .authorize(builder)
            .await?
            .send()
            .await
            .map_err(connection_error)?;

        if !response.status().is_success() {
            return Err(LlmError::Api {
                status: response.status().as_u16(),
                message: "health check failed".to_string(),
            });
        }
        Ok(())
    }
}

fn connection_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Connection(e.to_string())
    }
}

// Wire format of the chat-completions endpoint.

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatRequestMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage {
    role: &'static str,
    content: String,
}

impl From<&Message> for ChatRequestMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl ChatUsage {
    fn into_usage(self) -> TokenUsage {
        TokenUsage {
            prompt_tokens: self.prompt_tokens,
            completion_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_message_conversion() {
        let wire = ChatRequestMessage::from(&Message::user("hello"));
        assert_eq!(wire.role, "user");
        assert_eq!(wire.content, "hello");

        let wire = ChatRequestMessage::from(&Message::system("be brief"));
        assert_eq!(wire.role, "system");
    }

    #[test]
    fn test_request_omits_unset_max_tokens() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatRequestMessage::from(&Message::user("hi"))],
            temperature: 0.7,
            max_tokens: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-4o-mini\""));
        assert!(json.contains("\"temperature\":0.7"));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "id": "chatcmpl-123",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "{\"subject\": \"s\", \"body\": \"b\"}"},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
        }"#;

        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("{\"subject\": \"s\", \"body\": \"b\"}")
        );
        assert_eq!(parsed.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(parsed.usage.as_ref().unwrap().total_tokens, 160);
    }

    #[tokio::test]
    async fn test_static_and_absent_key_sources() {
        let source = ApiKeySource::Static("sk-test".to_string());
        assert_eq!(source.resolve().await.unwrap(), Some("sk-test".to_string()));

        assert_eq!(ApiKeySource::None.resolve().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_command_key_source_captures_stdout() {
        let source = ApiKeySource::Command("echo sk-from-command".to_string());
        assert_eq!(
            source.resolve().await.unwrap(),
            Some("sk-from-command".to_string())
        );
    }

    #[tokio::test]
    async fn test_command_key_source_rejects_empty_output() {
        let source = ApiKeySource::Command("true".to_string());
        assert!(source.resolve().await.is_err());
    }

    #[tokio::test]
    async fn test_command_key_source_reports_failure() {
        let source = ApiKeySource::Command("exit 3".to_string());
        let err = source.resolve().await.unwrap_err();
        assert!(matches!(err, LlmError::Connection(_)));
    }
}
