//! Pitch generation engine.
//!
//! Turns an artist profile and optional venue/style hints into a finished
//! two-field booking pitch. The primary path asks an LLM provider to draft
//! the pitch; any failure there falls back to a deterministic template
//! generator that always succeeds, so callers only ever see a finished
//! pitch or a not-found error.

mod fallback;
mod generator;
mod guidance;
mod prompt;
mod template;

pub use fallback::generate_fallback_pitch;
pub use generator::PitchGenerator;
pub use guidance::{
    parse_style, parse_venue_type, style_guidance, venue_guidance, PitchStyle, VenueType,
};
pub use prompt::{build_pitch_prompt, SYSTEM_INSTRUCTION};
pub use template::{render_template, TemplateVars};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder used when the caller did not name the target venue.
pub const DEFAULT_VENUE_NAME: &str = "your venue";

/// Placeholder used when the caller did not name the venue's city.
pub const DEFAULT_VENUE_CITY: &str = "your city";

/// A complete outreach message, ready to send to a venue.
///
/// Both fields are non-empty and trimmed. Subjects aim for 60 characters or
/// fewer by template design; the limit is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPitch {
    pub subject: String,
    pub body: String,
}

/// Optional details about the target venue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<VenueType>,
}

/// Errors surfaced to callers of the engine.
///
/// Generative-path failures are never surfaced; they are logged and absorbed
/// by the fallback. Only a failed artist lookup reaches the caller.
#[derive(Debug, Error)]
pub enum PitchError {
    /// The artist id did not resolve to a profile. Nothing can be generated.
    #[error("artist not found: {0}")]
    ArtistNotFound(String),

    /// The profile store failed while resolving the artist.
    #[error("profile store error: {0}")]
    Store(#[source] anyhow::Error),
}

/// Resolve the display name and city for an optional venue.
pub(crate) fn resolve_venue_display(venue: Option<&VenueInfo>) -> (&str, &str) {
    let name = venue
        .and_then(|v| v.name.as_deref())
        .unwrap_or(DEFAULT_VENUE_NAME);
    let city = venue
        .and_then(|v| v.city.as_deref())
        .unwrap_or(DEFAULT_VENUE_CITY);
    (name, city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_display_defaults_when_absent() {
        assert_eq!(
            resolve_venue_display(None),
            (DEFAULT_VENUE_NAME, DEFAULT_VENUE_CITY)
        );

        let empty = VenueInfo::default();
        assert_eq!(
            resolve_venue_display(Some(&empty)),
            (DEFAULT_VENUE_NAME, DEFAULT_VENUE_CITY)
        );
    }

    #[test]
    fn venue_display_uses_provided_fields() {
        let venue = VenueInfo {
            name: Some("Blue Note".to_string()),
            city: Some("NYC".to_string()),
            venue_type: Some(VenueType::JazzClub),
        };
        assert_eq!(resolve_venue_display(Some(&venue)), ("Blue Note", "NYC"));
    }

    #[test]
    fn venue_display_defaults_per_field() {
        let venue = VenueInfo {
            name: Some("Blue Note".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_venue_display(Some(&venue)),
            ("Blue Note", DEFAULT_VENUE_CITY)
        );
    }

    #[test]
    fn venue_info_parses_from_json() {
        let venue: VenueInfo =
            serde_json::from_str(r#"{"name": "The Cave", "venue_type": "rock-venue"}"#).unwrap();
        assert_eq!(venue.name.as_deref(), Some("The Cave"));
        assert!(venue.city.is_none());
        assert_eq!(venue.venue_type, Some(VenueType::RockVenue));
    }
}
