//! Generative pitch orchestration.
//!
//! The engine's entry point. Each call resolves the artist, makes at most one
//! generative attempt, validates its output, and otherwise falls back to the
//! deterministic template generator. Generative-path failures are logged and
//! absorbed; callers only ever see a finished pitch or a lookup error.

use super::fallback::generate_fallback_pitch;
use super::guidance::PitchStyle;
use super::prompt::{build_pitch_prompt, SYSTEM_INSTRUCTION};
use super::{GeneratedPitch, PitchError, VenueInfo};
use crate::llm::{CompletionOptions, FinishReason, LlmError, LlmProvider, Message};
use crate::profile::{ArtistProfile, ProfileStore};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Why a generative attempt produced nothing usable.
///
/// Either way the attempt is abandoned and the deterministic path takes over;
/// the distinction only matters for logging.
#[derive(Debug)]
enum GenerativeFailure {
    /// The provider call itself failed.
    Service(LlmError),
    /// The provider answered, but not with a valid pitch.
    MalformedOutput(String),
}

/// The pitch generation engine.
///
/// Holds the profile store and an optional LLM provider; without a provider
/// every pitch comes from the deterministic path. Stateless across calls and
/// safe to share between tasks.
pub struct PitchGenerator {
    store: Arc<dyn ProfileStore>,
    provider: Option<Arc<dyn LlmProvider>>,
    options: CompletionOptions,
}

impl PitchGenerator {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        provider: Option<Arc<dyn LlmProvider>>,
        options: CompletionOptions,
    ) -> Self {
        Self {
            store,
            provider,
            options,
        }
    }

    /// Generate a pitch for the given artist.
    ///
    /// Fails only when the artist id does not resolve (or the store itself
    /// errors); every other problem ends in the deterministic fallback.
    pub async fn generate_pitch(
        &self,
        artist_id: &str,
        venue: Option<&VenueInfo>,
        style: Option<PitchStyle>,
    ) -> Result<GeneratedPitch, PitchError> {
        let artist = self
            .store
            .artist_profile(artist_id)
            .map_err(PitchError::Store)?
            .ok_or_else(|| PitchError::ArtistNotFound(artist_id.to_string()))?;

        if let Some(provider) = &self.provider {
            match self
                .attempt_generative(provider.as_ref(), &artist, venue, style)
                .await
            {
                Ok(pitch) => {
                    debug!(artist_id, "Using generative pitch");
                    return Ok(pitch);
                }
                Err(GenerativeFailure::Service(err)) => {
                    warn!(
                        artist_id,
                        error = %err,
                        "Generative call failed, using template pitch"
                    );
                }
                Err(GenerativeFailure::MalformedOutput(reason)) => {
                    warn!(
                        artist_id,
                        reason = %reason,
                        "Generative output rejected, using template pitch"
                    );
                }
            }
        } else {
            debug!(artist_id, "No LLM provider configured, using template pitch");
        }

        Ok(generate_fallback_pitch(&artist, venue, style))
    }

    /// Make the single generative attempt and validate its output.
    async fn attempt_generative(
        &self,
        provider: &dyn LlmProvider,
        artist: &ArtistProfile,
        venue: Option<&VenueInfo>,
        style: Option<PitchStyle>,
    ) -> Result<GeneratedPitch, GenerativeFailure> {
        let messages = [
            Message::system(SYSTEM_INSTRUCTION),
            Message::user(build_pitch_prompt(artist, venue, style)),
        ];

        let response = provider
            .complete(&messages, &self.options)
            .await
            .map_err(GenerativeFailure::Service)?;

        if response.finish_reason == FinishReason::MaxTokens {
            debug!("Generative response was cut off at the token limit");
        }

        parse_generated_pitch(&response.message.content)
    }
}

/// Validate a provider response as a pitch.
///
/// The content must be a JSON object with string fields `subject` and `body`,
/// both non-empty after trimming. Extra fields are tolerated. The fields are
/// trimmed and otherwise passed through untouched.
fn parse_generated_pitch(content: &str) -> Result<GeneratedPitch, GenerativeFailure> {
    #[derive(Deserialize)]
    struct RawPitch {
        subject: String,
        body: String,
    }

    let raw: RawPitch = serde_json::from_str(content.trim()).map_err(|e| {
        GenerativeFailure::MalformedOutput(format!("not a valid pitch object: {}", e))
    })?;

    let subject = raw.subject.trim();
    let body = raw.body.trim();
    if subject.is_empty() {
        return Err(GenerativeFailure::MalformedOutput(
            "empty subject".to_string(),
        ));
    }
    if body.is_empty() {
        return Err(GenerativeFailure::MalformedOutput("empty body".to_string()));
    }

    Ok(GeneratedPitch {
        subject: subject.to_string(),
        body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::CompletionResponse;
    use crate::profile::InMemoryProfileStore;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn jane() -> ArtistProfile {
        ArtistProfile {
            id: "jane-doe".to_string(),
            name: "Jane Doe".to_string(),
            genre: "Jazz".to_string(),
            city: "NYC".to_string(),
            website: None,
            bio: None,
            pricing: None,
            availability: None,
            social_links: BTreeMap::new(),
        }
    }

    /// Provider scripted with a single outcome; panics if called twice.
    struct ScriptedProvider {
        script: Mutex<Option<Result<CompletionResponse, LlmError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn replies(content: &str) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(Some(Ok(CompletionResponse {
                    message: Message::assistant(content),
                    finish_reason: FinishReason::Stop,
                    usage: None,
                }))),
                calls: AtomicUsize::new(0),
            })
        }

        fn fails(err: LlmError) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(Some(Err(err))),
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _options: &CompletionOptions,
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .take()
                .expect("provider called more than once")
        }

        async fn health_check(&self) -> Result<(), LlmError> {
            Ok(())
        }
    }

    struct FailingStore;

    impl ProfileStore for FailingStore {
        fn artist_profile(&self, _artist_id: &str) -> anyhow::Result<Option<ArtistProfile>> {
            Err(anyhow::anyhow!("store offline"))
        }
    }

    fn engine(provider: Option<Arc<dyn LlmProvider>>) -> PitchGenerator {
        let store = Arc::new(InMemoryProfileStore::new([jane()]));
        PitchGenerator::new(store, provider, CompletionOptions::default())
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_template_pitch() {
        let provider = ScriptedProvider::fails(LlmError::Timeout);
        let generator = engine(Some(provider.clone()));

        let pitch = generator.generate_pitch("jane-doe", None, None).await.unwrap();

        assert_eq!(pitch, generate_fallback_pitch(&jane(), None, None));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn valid_generative_output_passes_through_untouched() {
        let provider =
            ScriptedProvider::replies(r#"{"subject": "Custom subject", "body": "Custom body"}"#);
        let generator = engine(Some(provider));

        let pitch = generator.generate_pitch("jane-doe", None, None).await.unwrap();

        assert_eq!(pitch.subject, "Custom subject");
        assert_eq!(pitch.body, "Custom body");
    }

    #[tokio::test]
    async fn unknown_artist_is_not_found_and_skips_the_provider() {
        let provider = ScriptedProvider::replies(r#"{"subject": "s", "body": "b"}"#);
        let generator = engine(Some(provider.clone()));

        let err = generator.generate_pitch("nobody", None, None).await.unwrap_err();

        assert!(matches!(err, PitchError::ArtistNotFound(ref id) if id == "nobody"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_surfaces_and_skips_the_provider() {
        let provider = ScriptedProvider::replies(r#"{"subject": "s", "body": "b"}"#);
        let generator = PitchGenerator::new(
            Arc::new(FailingStore),
            Some(provider.clone()),
            CompletionOptions::default(),
        );

        let err = generator.generate_pitch("jane-doe", None, None).await.unwrap_err();

        assert!(matches!(err, PitchError::Store(_)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn no_provider_means_template_pitch() {
        let generator = engine(None);
        let pitch = generator.generate_pitch("jane-doe", None, None).await.unwrap();
        assert_eq!(pitch, generate_fallback_pitch(&jane(), None, None));
    }

    #[test]
    fn parse_accepts_valid_pitch_and_trims_fields() {
        let pitch =
            parse_generated_pitch("  {\"subject\": \" Hi \", \"body\": \"\\nBody\\n\"}  ").unwrap();
        assert_eq!(pitch.subject, "Hi");
        assert_eq!(pitch.body, "Body");
    }

    #[test]
    fn parse_tolerates_extra_fields() {
        let pitch =
            parse_generated_pitch(r#"{"subject": "s", "body": "b", "confidence": 0.9}"#).unwrap();
        assert_eq!(pitch.subject, "s");
        assert_eq!(pitch.body, "b");
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(parse_generated_pitch("not json").is_err());
    }

    #[test]
    fn parse_rejects_fenced_json() {
        assert!(parse_generated_pitch("```json\n{\"subject\": \"s\", \"body\": \"b\"}\n```").is_err());
    }

    #[test]
    fn parse_rejects_missing_or_non_string_fields() {
        assert!(parse_generated_pitch(r#"{"subject": "s"}"#).is_err());
        assert!(parse_generated_pitch(r#"{"body": "b"}"#).is_err());
        assert!(parse_generated_pitch(r#"{"subject": 42, "body": "b"}"#).is_err());
        assert!(parse_generated_pitch(r#"{"subject": null, "body": "b"}"#).is_err());
    }

    #[test]
    fn parse_rejects_blank_fields() {
        assert!(parse_generated_pitch(r#"{"subject": "  ", "body": "b"}"#).is_err());
        assert!(parse_generated_pitch(r#"{"subject": "s", "body": "\n"}"#).is_err());
    }
}
