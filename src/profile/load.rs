//! Profile file loading.

use super::ArtistProfile;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Load artist profiles from a JSON file containing an array of profiles.
///
/// Duplicate ids are rejected: a later profile would silently shadow an
/// earlier one once the set is keyed by id.
pub fn load_profiles(path: &Path) -> Result<Vec<ArtistProfile>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profiles file: {:?}", path))?;
    let profiles: Vec<ArtistProfile> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse profiles file: {:?}", path))?;

    let mut seen = HashSet::new();
    for profile in &profiles {
        if profile.id.is_empty() {
            bail!("Profile for {:?} has an empty id", profile.name);
        }
        if !seen.insert(profile.id.as_str()) {
            bail!("Duplicate profile id: {}", profile.id);
        }
    }

    info!("Loaded {} artist profiles from {:?}", profiles.len(), path);
    Ok(profiles)
}
