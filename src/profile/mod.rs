//! Participant profile loading and seeding
//!
//! This module resolves roster entries against the rating store: existing
//! participants are loaded as-is, new ones are seeded from their rank label
//! and persisted exactly once.

pub mod seeding;

pub use seeding::{parse_rank_label, rating_to_rank_label, seed_ratings};

use crate::config::seeding::SeedingConfig;
use crate::error::Result;
use crate::store::RatingStore;
use crate::types::{ParticipantProfile, RosterEntry};
use tracing::{debug, info};

/// Resolve roster entries to full profiles, seeding participants the store
/// has not seen before.
///
/// Stored profiles always win: a returning participant's ratings and
/// preferences come from the store even if the roster entry disagrees.
pub fn load_or_seed_roster(
    store: &dyn RatingStore,
    entries: &[RosterEntry],
) -> Result<Vec<ParticipantProfile>> {
    let config = SeedingConfig::default();
    load_or_seed_roster_with(store, entries, &config)
}

/// As [`load_or_seed_roster`], with an explicit seeding configuration.
pub fn load_or_seed_roster_with(
    store: &dyn RatingStore,
    entries: &[RosterEntry],
    config: &SeedingConfig,
) -> Result<Vec<ParticipantProfile>> {
    let mut profiles = Vec::with_capacity(entries.len());

    for entry in entries {
        if let Some(stored) = store.get(&entry.id)? {
            debug!(participant = %entry.id, "Loaded stored profile");
            profiles.push(stored.profile);
            continue;
        }

        let rank_label = entry.rank.as_deref().unwrap_or("");
        let (tier, division) = parse_rank_label(rank_label, config);
        let ratings = seed_ratings(tier, division, entry.primary, entry.secondary, config);
        let profile = ParticipantProfile::new(
            entry.id.clone(),
            ratings,
            entry.primary,
            entry.secondary,
        );

        store.seed(profile.clone())?;
        info!(
            participant = %entry.id,
            tier = %tier,
            "Seeded new participant"
        );
        profiles.push(profile);
    }

    Ok(profiles)
}
