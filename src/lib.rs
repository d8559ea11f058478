//! GigPitch Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod llm;
pub mod pitch;
pub mod profile;

// Re-export commonly used types for convenience
pub use llm::{ApiKeySource, CompletionOptions, LlmProvider, OpenAIProvider};
pub use pitch::{
    generate_fallback_pitch, GeneratedPitch, PitchError, PitchGenerator, PitchStyle, VenueInfo,
    VenueType,
};
pub use profile::{load_profiles, ArtistProfile, InMemoryProfileStore, ProfileStore};
