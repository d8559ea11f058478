//! Prompt construction for the generative path.
//!
//! Builds the two messages sent to the LLM provider: a fixed system
//! instruction that pins the output shape, and a user prompt embedding the
//! full artist profile, the resolved venue fields, and the guidance blocks.

use super::guidance::{style_guidance, venue_guidance, PitchStyle};
use super::{resolve_venue_display, VenueInfo};
use crate::profile::ArtistProfile;

/// Fixed system instruction for the generative call.
///
/// The orchestrator only accepts a bare JSON object back, so the instruction
/// forbids fences, prose, and anything else around it.
pub const SYSTEM_INSTRUCTION: &str = "You write venue-booking outreach emails for independent \
    artists. Respond ONLY with a JSON object containing exactly two string fields: \"subject\" \
    and \"body\". Do not use markdown code fences. Do not include explanations or any text \
    outside the JSON object. Keep the subject under 60 characters.";

/// Build the user prompt for one generation.
pub fn build_pitch_prompt(
    artist: &ArtistProfile,
    venue: Option<&VenueInfo>,
    style: Option<PitchStyle>,
) -> String {
    let (venue_name, venue_city) = resolve_venue_display(venue);

    let mut lines = vec![
        format!(
            "Write a booking pitch email from the artist below to {} in {}.",
            venue_name, venue_city
        ),
        String::new(),
        "Artist profile:".to_string(),
        format!("- Name: {}", artist.name),
        format!("- Genre: {}", artist.genre),
        format!("- Based in: {}", artist.city),
    ];
    if let Some(website) = &artist.website {
        lines.push(format!("- Website: {}", website));
    }
    if let Some(bio) = &artist.bio {
        lines.push(format!("- Bio: {}", bio));
    }
    if let Some(pricing) = &artist.pricing {
        lines.push(format!("- Typical pricing: {}", pricing));
    }
    if let Some(availability) = &artist.availability {
        lines.push(format!("- Availability: {}", availability));
    }
    for (platform, url) in &artist.social_links {
        lines.push(format!("- {}: {}", platform, url));
    }

    let venue_block = venue_guidance(venue.and_then(|v| v.venue_type));
    if !venue_block.is_empty() {
        lines.push(String::new());
        lines.push("About this type of venue:".to_string());
        lines.push(venue_block.to_string());
    }

    let style_block = style_guidance(style);
    if !style_block.is_empty() {
        lines.push(String::new());
        lines.push("Tone:".to_string());
        lines.push(style_block.to_string());
    }

    lines.push(String::new());
    lines.push(
        "Write a concise, personal pitch that makes the booker want to reply.".to_string(),
    );

    lines.join("\n")
}
