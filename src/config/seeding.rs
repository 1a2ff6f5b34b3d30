//! Seeding configuration: rank tiers, division offsets, role penalties
//!
//! New participants get a per-role rating map derived from their stated rank
//! and preferences. Everything here is a tunable constant, not an algorithm.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The ten rank tiers, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    /// All tiers, lowest to highest
    pub const ALL: [Tier; 10] = [
        Tier::Iron,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Emerald,
        Tier::Diamond,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Challenger,
    ];

    /// Position in the tier ladder, 0-based
    pub fn index(self) -> usize {
        Tier::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    /// Master and above have no divisions
    pub fn has_divisions(self) -> bool {
        self < Tier::Master
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Iron => "Iron",
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Emerald => "Emerald",
            Tier::Diamond => "Diamond",
            Tier::Master => "Master",
            Tier::Grandmaster => "Grandmaster",
            Tier::Challenger => "Challenger",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Tier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IRON" => Ok(Tier::Iron),
            "BRONZE" => Ok(Tier::Bronze),
            "SILVER" => Ok(Tier::Silver),
            "GOLD" => Ok(Tier::Gold),
            "PLATINUM" | "PLAT" => Ok(Tier::Platinum),
            "EMERALD" => Ok(Tier::Emerald),
            "DIAMOND" => Ok(Tier::Diamond),
            "MASTER" => Ok(Tier::Master),
            "GRANDMASTER" | "GM" => Ok(Tier::Grandmaster),
            "CHALLENGER" => Ok(Tier::Challenger),
            _ => Err(()),
        }
    }
}

/// Division within a tier, 1 (highest) to 4 (lowest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division(pub u8);

/// Tunable seeding constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingConfig {
    /// Base rating per tier, indexed by `Tier::index()`
    pub tier_bases: [i32; 10],
    /// Extra rating per division, indexed by division - 1 (division 1 highest)
    pub division_offsets: [i32; 4],
    /// Rating subtracted from the secondary-preference role when seeding
    pub secondary_penalty: i32,
    /// Rating subtracted from every other role when seeding
    pub off_role_penalty: i32,
    /// Tier assumed when a rank label cannot be parsed
    pub fallback_tier: Tier,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            // Linear 500-point ladder
            tier_bases: [0, 500, 1000, 1500, 2000, 2500, 3000, 3500, 4000, 4500],
            division_offsets: [300, 200, 100, 0],
            secondary_penalty: 200,
            off_role_penalty: 500,
            fallback_tier: Tier::Silver,
        }
    }
}

impl SeedingConfig {
    /// Base rating for a tier
    pub fn tier_base(&self, tier: Tier) -> i32 {
        self.tier_bases[tier.index()]
    }

    /// Rating offset for a division; absent or out-of-table divisions get 0
    pub fn division_offset(&self, division: Option<Division>) -> i32 {
        match division {
            Some(Division(d)) if (1..=4).contains(&d) => self.division_offsets[(d - 1) as usize],
            _ => 0,
        }
    }
}
