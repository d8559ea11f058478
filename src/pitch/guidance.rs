//! Venue-type and pitch-style guidance.
//!
//! Static lookup tables used to steer the generative prompt. Venue types and
//! styles are closed enums, so the tables are exhaustive by construction;
//! unrecognized wire ids are handled at parse time and degrade to the
//! generic path.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const JAZZ_CLUB_GUIDANCE: &str = "Jazz clubs are intimate listening rooms where the audience comes \
    specifically to pay attention to the music, often over cocktails or a late dinner. When pitching \
    a jazz club: emphasize musicianship and repertoire depth rather than volume or spectacle; mention \
    any standards, originals, or notable arrangements in the set; highlight experience playing \
    listening rooms or supper clubs; note ensemble flexibility (duo, trio, quartet) since stages are \
    small; keep the tone sophisticated and understated; and reference the club's booking calendar or \
    resident nights if known.";

const ROCK_VENUE_GUIDANCE: &str = "Rock venues are ticket-driven rooms that live or die on draw and \
    energy, with loud full-band production and a standing crowd. When pitching a rock venue: lead \
    with your local draw and recent attendance numbers; name comparable acts you have opened for or \
    shared bills with; emphasize the energy of the live show; mention your own promotion channels \
    (mailing list, socials) since draw is shared work; offer to fill a support slot rather than \
    demanding a headline; and link to live footage so the booker can judge stage presence fast.";

const COFFEE_SHOP_GUIDANCE: &str = "Coffee shops host low-volume background-to-foreground music for \
    customers who came for coffee first and tunes second. When pitching a coffee shop: stress that \
    the set is acoustic or lightly amplified and conversation-friendly; emphasize reliability and a \
    self-contained setup (you bring what you need and need little space); propose daytime or early \
    evening slots that match their hours; mention an ability to read the room and adjust volume; and \
    keep expectations for fees modest, with tips or a small guarantee as the usual arrangement.";

const RESTAURANT_GUIDANCE: &str = "Restaurants book music as part of the dining atmosphere, so the \
    music must complement a meal without overpowering conversation. When pitching a restaurant: \
    emphasize professionalism and punctuality; stress an ambient, tasteful repertoire suited to \
    dinner service; note experience with long sets played at consistent low volume; reassure them \
    about a compact, tidy setup that will not crowd tables; offer a trial evening; and mention \
    flexibility on start times around their service rhythm.";

const PROFESSIONAL_INTRO_GUIDANCE: &str = "Write in a polished, professional register: a courteous \
    formal greeting, complete sentences, no slang, and a clear statement of who the artist is and \
    why they fit the venue. Keep the message concise and confident, close with a specific call to \
    action, and sign off formally.";

const CASUAL_FRIENDLY_GUIDANCE: &str = "Write in a warm, casual register, as if reaching out to a \
    fellow music lover: a friendly greeting, contractions, short lively sentences, and an \
    enthusiastic but genuine tone. Avoid corporate phrasing, let personality show, and close with \
    an easygoing invitation to chat.";

const DATA_DRIVEN_GUIDANCE: &str = "Write in a metrics-forward register aimed at a booker who thinks \
    in numbers: lead with engagement and draw, quantify the local following, typical attendance, \
    repeat-audience rate, and social reach, and frame the artist as a low-risk booking backed by \
    evidence. Keep claims concrete and skip flowery language.";

/// The kind of venue being pitched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum VenueType {
    JazzClub,
    RockVenue,
    CoffeeShop,
    Restaurant,
}

impl VenueType {
    /// Free-text guidance describing the venue type and how to pitch it.
    pub fn guidance(&self) -> &'static str {
        match self {
            VenueType::JazzClub => JAZZ_CLUB_GUIDANCE,
            VenueType::RockVenue => ROCK_VENUE_GUIDANCE,
            VenueType::CoffeeShop => COFFEE_SHOP_GUIDANCE,
            VenueType::Restaurant => RESTAURANT_GUIDANCE,
        }
    }
}

/// The tone/approach requested for the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PitchStyle {
    ProfessionalIntro,
    CasualFriendly,
    DataDriven,
}

impl PitchStyle {
    /// Free-text guidance describing the tone and approach.
    pub fn guidance(&self) -> &'static str {
        match self {
            PitchStyle::ProfessionalIntro => PROFESSIONAL_INTRO_GUIDANCE,
            PitchStyle::CasualFriendly => CASUAL_FRIENDLY_GUIDANCE,
            PitchStyle::DataDriven => DATA_DRIVEN_GUIDANCE,
        }
    }
}

/// Guidance for an optional venue type. Absent types yield an empty string.
pub fn venue_guidance(venue_type: Option<VenueType>) -> &'static str {
    venue_type.map(|v| v.guidance()).unwrap_or("")
}

/// Guidance for an optional style. Absent styles yield an empty string.
pub fn style_guidance(style: Option<PitchStyle>) -> &'static str {
    style.map(|s| s.guidance()).unwrap_or("")
}

/// Parses a venue type wire id (e.g. "jazz-club") into a VenueType.
/// Uses clap's ValueEnum trait for parsing; unknown ids yield None.
pub fn parse_venue_type(s: &str) -> Option<VenueType> {
    VenueType::from_str(s, true).ok()
}

/// Parses a style wire id (e.g. "data-driven") into a PitchStyle.
/// Uses clap's ValueEnum trait for parsing; unknown ids yield None.
pub fn parse_style(s: &str) -> Option<PitchStyle> {
    PitchStyle::from_str(s, true).ok()
}
