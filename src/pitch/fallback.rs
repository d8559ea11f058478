//! Deterministic template-based pitch generation.
//!
//! The fallback path of the engine: pure string composition over fixed
//! templates, with no I/O and no failure modes. Whatever the inputs, this
//! module produces a complete pitch with a non-empty subject and body.
//!
//! The pitch is assembled as a structured draft (subject plus named body
//! sections) and rendered to text at the end. Venue-type augmentation and
//! style transforms override draft fields, so they compose without ever
//! searching the text produced so far.

use super::guidance::{PitchStyle, VenueType};
use super::template::{render_template, TemplateVars};
use super::{resolve_venue_display, GeneratedPitch, VenueInfo};
use crate::profile::ArtistProfile;

const BASE_SUBJECT: &str = "Booking Inquiry: {artist_name} - {genre} Artist";
const CASUAL_SUBJECT: &str = "Hey! {artist_name} here, let's book a show";
const DATA_DRIVEN_SUBJECT: &str = "High-Engagement {genre} for {venue_name}";

const BASE_OPENER: &str = "Hi {venue_name} team,\n\n\
    My name is {artist_name}, and I'm a {genre} artist based in {city}.";
const CASUAL_OPENER: &str = "Hey {venue_name} crew!\n\n\
    I'm {artist_name}, a {genre} artist from {city}, and I'd love to bring my sound to your space.";

const GENERIC_FIT_STATEMENT: &str =
    "I believe my music would be a great fit for your venue and audience.";
const JAZZ_CLUB_FIT_STATEMENT: &str = "My sound is a natural fit for a sophisticated jazz audience \
    and the intimate atmosphere your club is known for.";
const ROCK_VENUE_FIT_STATEMENT: &str =
    "My live set brings the energy and crowd draw a rock room thrives on.";
const COFFEE_SHOP_FIT_STATEMENT: &str =
    "My acoustic, low-volume sets suit a relaxed coffee shop ambiance without crowding the room.";
const RESTAURANT_FIT_STATEMENT: &str = "I provide professional, ambient background music that \
    complements a dining atmosphere without overpowering conversation.";

const BASE_FACTS_LEAD: &str = "A little about me:";
const DATA_DRIVEN_FACTS_LEAD: &str = "Here's what I bring:";

const BASE_CLOSER: &str = "I'd love to discuss a performance at {venue_name} in {venue_city}. \
    I'm happy to share live recordings or references on request.\n\n\
    Best regards,\n{artist_name}";
const CASUAL_CLOSER: &str = "Drop me a line if this sounds like a fit, I'd love to come play for \
    you!\n\nCheers,\n{artist_name}";

/// Build a complete pitch from the artist profile and optional venue/style.
///
/// Always succeeds: unknown or absent venue details fall back to generic
/// placeholders, and an absent style leaves the professional base form.
pub fn generate_fallback_pitch(
    artist: &ArtistProfile,
    venue: Option<&VenueInfo>,
    style: Option<PitchStyle>,
) -> GeneratedPitch {
    let vars = build_vars(artist, venue);
    let mut draft = PitchDraft::base(artist, &vars);

    if let Some(venue_type) = venue.and_then(|v| v.venue_type) {
        draft.fit_statement = fit_statement(venue_type).to_string();
    }

    match style {
        Some(PitchStyle::CasualFriendly) => draft.apply_casual(&vars),
        Some(PitchStyle::DataDriven) => draft.apply_data_driven(&vars),
        Some(PitchStyle::ProfessionalIntro) | None => {}
    }

    draft.render()
}

/// The structured draft the deterministic path assembles before rendering.
/// Sections are plain rendered text; transforms replace whole sections.
struct PitchDraft {
    subject: String,
    opener: String,
    fit_statement: String,
    facts_lead: String,
    facts: Vec<String>,
    closer: String,
}

impl PitchDraft {
    fn base(artist: &ArtistProfile, vars: &TemplateVars) -> Self {
        Self {
            subject: render_template(BASE_SUBJECT, vars),
            opener: render_template(BASE_OPENER, vars),
            fit_statement: GENERIC_FIT_STATEMENT.to_string(),
            facts_lead: BASE_FACTS_LEAD.to_string(),
            facts: base_facts(artist, vars),
            closer: render_template(BASE_CLOSER, vars),
        }
    }

    fn apply_casual(&mut self, vars: &TemplateVars) {
        self.subject = render_template(CASUAL_SUBJECT, vars);
        self.opener = render_template(CASUAL_OPENER, vars);
        self.closer = render_template(CASUAL_CLOSER, vars);
    }

    fn apply_data_driven(&mut self, vars: &TemplateVars) {
        self.subject = render_template(DATA_DRIVEN_SUBJECT, vars);
        self.facts_lead = DATA_DRIVEN_FACTS_LEAD.to_string();
        self.facts = data_driven_facts(vars);
    }

    fn render(self) -> GeneratedPitch {
        let mut body = String::new();
        body.push_str(&self.opener);
        body.push_str("\n\n");
        body.push_str(&self.fit_statement);
        body.push_str("\n\n");
        body.push_str(&self.facts_lead);
        body.push('\n');
        for fact in &self.facts {
            body.push_str("- ");
            body.push_str(fact);
            body.push('\n');
        }
        body.push('\n');
        body.push_str(&self.closer);

        GeneratedPitch {
            subject: self.subject.trim().to_string(),
            body: body.trim().to_string(),
        }
    }
}

fn build_vars(artist: &ArtistProfile, venue: Option<&VenueInfo>) -> TemplateVars {
    let (venue_name, venue_city) = resolve_venue_display(venue);
    let mut vars = TemplateVars::new();
    vars.set("artist_name", &artist.name);
    vars.set("genre", &artist.genre);
    vars.set("city", &artist.city);
    vars.set_opt("website", artist.website.clone());
    vars.set("venue_name", venue_name);
    vars.set("venue_city", venue_city);
    vars
}

fn fit_statement(venue_type: VenueType) -> &'static str {
    match venue_type {
        VenueType::JazzClub => JAZZ_CLUB_FIT_STATEMENT,
        VenueType::RockVenue => ROCK_VENUE_FIT_STATEMENT,
        VenueType::CoffeeShop => COFFEE_SHOP_FIT_STATEMENT,
        VenueType::Restaurant => RESTAURANT_FIT_STATEMENT,
    }
}

fn base_facts(artist: &ArtistProfile, vars: &TemplateVars) -> Vec<String> {
    let mut facts = vec![
        render_template("Genre: {genre}", vars),
        render_template("Based in: {city}", vars),
    ];
    if artist.website.is_some() {
        facts.push(render_template("Website: {website}", vars));
    }
    for (platform, url) in &artist.social_links {
        facts.push(format!("{}: {}", platform, url));
    }
    facts
}

fn data_driven_facts(vars: &TemplateVars) -> Vec<String> {
    vec![
        render_template(
            "Local following: 2,500+ engaged {genre} listeners around {city}",
            vars,
        ),
        "Average draw: 75-120 attendees per headline show".to_string(),
        "Audience retention: over 40% repeat attendance across recent shows".to_string(),
        "Social reach: 10,000+ combined followers across platforms".to_string(),
    ]
}
