//! Balancing configuration: optimizer bonuses, fairness caps, ranking policy

use serde::{Deserialize, Serialize};

/// How the optimizer solves the 5x5 role assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStrategy {
    /// Kuhn-Munkres optimal matching on the score matrix
    Hungarian,
    /// Enumerate all 120 role permutations; must agree with Hungarian
    Exhaustive,
}

/// How candidate splits are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankingStrategy {
    /// Exclude splits with unequal off-role counts, rank by ascending gap
    BalanceFirst,
    /// Rank by descending preference score, then ascending gap
    PreferenceFirst,
}

/// Per-split preference weights used by `RankingStrategy::PreferenceFirst`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PreferenceWeights {
    pub primary: i32,
    pub secondary: i32,
    pub off_role: i32,
}

impl Default for PreferenceWeights {
    fn default() -> Self {
        Self {
            primary: 10,
            secondary: 5,
            off_role: -15,
        }
    }
}

/// Tunable balancing constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Score bonus for playing the primary preference
    pub primary_bonus: i32,
    /// Score bonus for playing the secondary preference
    pub secondary_bonus: i32,
    /// Best-rating deficit at which an assignment counts as off-role
    pub off_role_threshold: i32,
    /// Maximum off-role assignments allowed per team
    pub off_role_cap: usize,
    /// Gap at or below which the search may stop early
    pub early_exit_gap: i32,
    /// Whether the presorted search may stop at a good-enough split
    pub early_exit: bool,
    /// How many ranked candidates `rank_splits` returns
    pub top_k: usize,
    pub assignment_strategy: AssignmentStrategy,
    pub ranking_strategy: RankingStrategy,
    pub preference_weights: PreferenceWeights,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            primary_bonus: 100,
            secondary_bonus: 50,
            off_role_threshold: 500,
            off_role_cap: 2,
            early_exit_gap: 100,
            early_exit: false,
            top_k: 3,
            assignment_strategy: AssignmentStrategy::Hungarian,
            ranking_strategy: RankingStrategy::BalanceFirst,
            preference_weights: PreferenceWeights::default(),
        }
    }
}
