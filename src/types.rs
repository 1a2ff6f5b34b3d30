//! Common types used throughout the team balancer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for participants
pub type ParticipantId = String;

/// Unique identifier for matches
pub type MatchId = Uuid;

/// Number of participants in a full roster
pub const ROSTER_SIZE: usize = 10;

/// Number of participants per team
pub const TEAM_SIZE: usize = 5;

/// The five roles every team must fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Role {
    /// All roles in display order
    pub const ALL: [Role; TEAM_SIZE] = [
        Role::Top,
        Role::Jungle,
        Role::Mid,
        Role::Adc,
        Role::Support,
    ];

    /// Stable index of this role in [`Role::ALL`]
    pub fn index(self) -> usize {
        match self {
            Role::Top => 0,
            Role::Jungle => 1,
            Role::Mid => 2,
            Role::Adc => 3,
            Role::Support => 4,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Top => write!(f, "Top"),
            Role::Jungle => write!(f, "Jungle"),
            Role::Mid => write!(f, "Mid"),
            Role::Adc => write!(f, "ADC"),
            Role::Support => write!(f, "Support"),
        }
    }
}

impl FromStr for Role {
    type Err = crate::error::BalancerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TOP" => Ok(Role::Top),
            "JUNGLE" | "JGL" | "JG" => Ok(Role::Jungle),
            "MID" | "MIDDLE" => Ok(Role::Mid),
            "ADC" | "BOT" | "BOTTOM" => Ok(Role::Adc),
            "SUPPORT" | "SUP" | "SUPP" => Ok(Role::Support),
            other => Err(crate::error::BalancerError::MalformedOutcome {
                reason: format!("Unknown role: {other}"),
            }),
        }
    }
}

/// A participant's stated role preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RolePreference {
    /// A specific preferred role
    Role(Role),
    /// No preference; happy to play anything
    Fill,
}

impl RolePreference {
    /// Whether this preference names the given role
    pub fn is_role(self, role: Role) -> bool {
        matches!(self, RolePreference::Role(r) if r == role)
    }

    /// Whether this preference is flexible
    pub fn is_fill(self) -> bool {
        matches!(self, RolePreference::Fill)
    }
}

impl std::fmt::Display for RolePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RolePreference::Role(role) => write!(f, "{role}"),
            RolePreference::Fill => write!(f, "Fill"),
        }
    }
}

impl FromStr for RolePreference {
    type Err = crate::error::BalancerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FILL" | "FLEX" | "ANY" | "NONE" | "" => Ok(RolePreference::Fill),
            other => other.parse::<Role>().map(RolePreference::Role),
        }
    }
}

/// Per-role integer ratings, exactly one entry per role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingMap([i32; TEAM_SIZE]);

impl RatingMap {
    /// Build a rating map with the same value for every role
    pub fn uniform(rating: i32) -> Self {
        Self([rating; TEAM_SIZE])
    }

    /// Build a rating map from a per-role function
    pub fn from_fn(mut f: impl FnMut(Role) -> i32) -> Self {
        let mut ratings = [0; TEAM_SIZE];
        for role in Role::ALL {
            ratings[role.index()] = f(role);
        }
        Self(ratings)
    }

    /// Rating for the given role
    pub fn get(&self, role: Role) -> i32 {
        self.0[role.index()]
    }

    /// Overwrite the rating for the given role
    pub fn set(&mut self, role: Role, rating: i32) {
        self.0[role.index()] = rating;
    }

    /// Highest rating across all five roles
    pub fn best(&self) -> i32 {
        // The array is never empty
        *self.0.iter().max().unwrap_or(&0)
    }

    /// Iterate over (role, rating) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Role, i32)> + '_ {
        Role::ALL.iter().map(move |&role| (role, self.get(role)))
    }
}

/// A participant's durable profile: identity, per-role ratings, preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub id: ParticipantId,
    pub ratings: RatingMap,
    pub primary: RolePreference,
    pub secondary: RolePreference,
}

impl ParticipantProfile {
    pub fn new(
        id: impl Into<ParticipantId>,
        ratings: RatingMap,
        primary: RolePreference,
        secondary: RolePreference,
    ) -> Self {
        Self {
            id: id.into(),
            ratings,
            primary,
            secondary,
        }
    }

    /// Highest rating across roles
    pub fn best_rating(&self) -> i32 {
        self.ratings.best()
    }

    /// Whether playing `role` puts this participant off-role: their rating
    /// there trails their best role by at least `threshold`.
    pub fn is_off_role(&self, role: Role, threshold: i32) -> bool {
        self.best_rating() - self.ratings.get(role) >= threshold
    }

    /// Whether `role` matches neither stated preference, with a non-Fill
    /// primary. Used for role-swap detection after a match.
    pub fn is_unexpected_role(&self, role: Role) -> bool {
        !self.primary.is_role(role) && !self.secondary.is_role(role) && !self.primary.is_fill()
    }
}

/// Roster input for one participant, as supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: ParticipantId,
    /// Rank label like "Gold 2"; used only when seeding a new participant
    pub rank: Option<String>,
    pub primary: RolePreference,
    pub secondary: RolePreference,
}

/// One way of partitioning the 10-participant roster into two teams of 5.
///
/// Holds indices into the roster slice the split was enumerated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamSplit {
    pub team_a: [usize; TEAM_SIZE],
    pub team_b: [usize; TEAM_SIZE],
}

/// One role slot filled by one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedSlot {
    pub role: Role,
    pub participant_id: ParticipantId,
    /// Raw rating for the assigned role, bonuses excluded
    pub rating: i32,
    pub off_role: bool,
}

/// A full role-to-participant assignment for one team, in role order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub slots: Vec<AssignedSlot>,
    /// Sum of raw assigned-role ratings
    pub total_rating: i32,
    pub off_role_count: usize,
}

/// The chosen pairing of two assigned teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancedMatch {
    pub team_a: RoleAssignment,
    pub team_b: RoleAssignment,
    /// Absolute difference between the two teams' rating totals
    pub gap: i32,
}

/// One participant's slot in a finished match, with the role actually played
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedSlot {
    pub participant_id: ParticipantId,
    pub role: Role,
}

/// A completed match as reported by an external result source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub match_id: MatchId,
    pub winning_team: Vec<PlayedSlot>,
    pub losing_team: Vec<PlayedSlot>,
}

/// Rating change for one participant after a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub participant_id: ParticipantId,
    /// Role actually played, whose rating is the one mutated
    pub role: Role,
    pub delta: i32,
    pub old_rating: i32,
    pub new_rating: i32,
    pub opponent_id: ParticipantId,
}

/// A participant who played a role outside their stated preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSwap {
    pub participant_id: ParticipantId,
    pub expected_primary: RolePreference,
    pub expected_secondary: RolePreference,
    pub actual: Role,
}

/// Full result of applying one match outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingUpdateReport {
    pub match_id: MatchId,
    pub changes: HashMap<ParticipantId, RatingChange>,
    pub role_swaps: Vec<RoleSwap>,
}
