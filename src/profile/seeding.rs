//! Rank-label parsing and per-role rating seeding
//!
//! A new participant's rating map is derived from their stated rank
//! ("Gold 2") and role preferences. Seeding runs exactly once per
//! participant; the store keeps the map authoritative afterwards.

use crate::config::seeding::{Division, SeedingConfig, Tier};
use crate::types::{RatingMap, Role, RolePreference};

/// Parse a rank label like "Gold 2" or "Master" into a tier and optional
/// division. Unparsable input falls back to the configured middle tier with
/// no division (lowest offset).
pub fn parse_rank_label(label: &str, config: &SeedingConfig) -> (Tier, Option<Division>) {
    let mut parts = label.split_whitespace();

    let tier = match parts.next().and_then(|t| t.parse::<Tier>().ok()) {
        Some(tier) => tier,
        None => return (config.fallback_tier, None),
    };

    let division = parts
        .next()
        .and_then(|d| d.parse::<u8>().ok())
        .filter(|d| (1..=4).contains(d))
        .map(Division);

    (tier, division)
}

/// Seed a complete five-role rating map.
///
/// The base rating comes from the tier/division tables. Each role then takes
/// a penalty: none for the primary role (or when either preference is Fill),
/// the secondary penalty for the secondary role, and the off-role penalty
/// everywhere else.
pub fn seed_ratings(
    tier: Tier,
    division: Option<Division>,
    primary: RolePreference,
    secondary: RolePreference,
    config: &SeedingConfig,
) -> RatingMap {
    let base = config.tier_base(tier) + config.division_offset(division);

    RatingMap::from_fn(|role| {
        let penalty = if primary.is_role(role) || primary.is_fill() || secondary.is_fill() {
            0
        } else if secondary.is_role(role) {
            config.secondary_penalty
        } else {
            config.off_role_penalty
        };
        base - penalty
    })
}

/// Map a rating back to a display label like "Gold 2", the inverse of the
/// seeding tables. Master and above carry no division.
pub fn rating_to_rank_label(rating: i32, config: &SeedingConfig) -> String {
    // Highest tier whose base the rating reaches; below Iron clamps to Iron
    let tier_idx = config
        .tier_bases
        .iter()
        .rposition(|&base| base <= rating)
        .unwrap_or(0);
    let tier = Tier::ALL[tier_idx];

    if !tier.has_divisions() {
        return tier.to_string();
    }

    // Highest division whose offset the remainder reaches (division 1 first)
    let within_tier = (rating - config.tier_bases[tier_idx]).max(0);
    let division = (1..=4u8)
        .find(|&d| config.division_offset(Some(Division(d))) <= within_tier)
        .unwrap_or(4);
    format!("{tier} {division}")
}
