//! Artist profiles and the store seam the engine reads them through.
//!
//! Profiles are owned by whatever system manages artists; the engine only
//! ever looks one up by id. `InMemoryProfileStore` backs the CLI and tests;
//! real deployments implement `ProfileStore` over their own storage.

mod load;

pub use load::load_profiles;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// An artist's profile: identity plus the descriptive attributes a pitch is
/// built from. Immutable input to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistProfile {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Platform name to URL. Ordered map so rendered link lists are stable.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub social_links: BTreeMap<String, String>,
}

pub trait ProfileStore: Send + Sync {
    /// Returns the artist's profile given the artist id.
    /// Returns Ok(None) if the artist does not exist.
    /// Returns Err if there is a store error.
    fn artist_profile(&self, artist_id: &str) -> Result<Option<ArtistProfile>>;
}

/// A profile store backed by a plain map.
///
/// Read-only after construction, so lookups need no synchronization.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: HashMap<String, ArtistProfile>,
}

impl InMemoryProfileStore {
    pub fn new(profiles: impl IntoIterator<Item = ArtistProfile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.id.clone(), profile))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn artist_profile(&self, artist_id: &str) -> Result<Option<ArtistProfile>> {
        Ok(self.profiles.get(artist_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn parses_minimal_profile() {
        let s = r#"
        {
            "id": "jane-doe",
            "name": "Jane Doe",
            "genre": "Jazz",
            "city": "NYC"
        }
        "#;
        let profile: ArtistProfile = serde_json::from_str(s).unwrap();
        assert_eq!(profile, jane());
    }

    #[test]
    fn parses_full_profile() {
        let s = r#"
        {
            "id": "jane-doe",
            "name": "Jane Doe",
            "genre": "Jazz",
            "city": "NYC",
            "website": "https://janedoe.example",
            "bio": "Award-winning vocalist.",
            "pricing": "$400-800 per night",
            "availability": "Weekends",
            "social_links": {
                "Instagram": "https://instagram.com/janedoe"
            }
        }
        "#;
        let profile: ArtistProfile = serde_json::from_str(s).unwrap();
        assert_eq!(profile.website.as_deref(), Some("https://janedoe.example"));
        assert_eq!(profile.bio.as_deref(), Some("Award-winning vocalist."));
        assert_eq!(profile.pricing.as_deref(), Some("$400-800 per night"));
        assert_eq!(profile.availability.as_deref(), Some("Weekends"));
        assert_eq!(
            profile.social_links.get("Instagram").map(String::as_str),
            Some("https://instagram.com/janedoe")
        );
    }

    #[test]
    fn optional_fields_are_skipped_when_serialized() {
        let json = serde_json::to_string(&jane()).unwrap();
        assert!(!json.contains("website"));
        assert!(!json.contains("social_links"));
    }

    #[test]
    fn store_returns_profile_for_known_id() {
        let store = InMemoryProfileStore::new([jane()]);
        let found = store.artist_profile("jane-doe").unwrap();
        assert_eq!(found, Some(jane()));
    }

    #[test]
    fn store_returns_none_for_unknown_id() {
        let store = InMemoryProfileStore::new([jane()]);
        assert!(store.artist_profile("nobody").unwrap().is_none());
        assert_eq!(store.len(), 1);
    }
}
