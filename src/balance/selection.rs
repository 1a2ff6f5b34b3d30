//! Split selection policy
//!
//! Iterates every distinct split, assigns both teams, filters out unfair
//! candidates, and ranks the survivors. Two ranking strategies exist:
//! balance-first (the reference) excludes splits with unequal off-role
//! counts and ranks by ascending gap; preference-first ranks by how well
//! participants land on their stated roles, breaking ties by gap.
//!
//! Splits are evaluated most-balanced-looking first (by proximity of each
//! team's summed best rating to half the roster total). With early exit
//! enabled, the search stops at the first candidate with equal off-role
//! counts and a gap at or below the configured threshold.

use crate::balance::assignment::assign_roles;
use crate::balance::splits::enumerate_splits;
use crate::config::balance::{BalanceConfig, PreferenceWeights, RankingStrategy};
use crate::error::{BalancerError, Result};
use crate::types::{BalancedMatch, ParticipantProfile, RoleAssignment, TeamSplit};
use crate::utils::rating_gap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One evaluated split that survived the fairness constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitCandidate {
    pub team_a: RoleAssignment,
    pub team_b: RoleAssignment,
    pub gap: i32,
    pub off_role_diff: usize,
    pub preference_score: i32,
}

impl SplitCandidate {
    /// Collapse the candidate into the caller-facing result shape
    pub fn into_match(self) -> BalancedMatch {
        BalancedMatch {
            team_a: self.team_a,
            team_b: self.team_b,
            gap: self.gap,
        }
    }
}

/// Select the single best split for a full roster.
///
/// Fails with `NoValidSplit` when every split is excluded by the fairness
/// constraints.
pub fn select_best(roster: &[ParticipantProfile], config: &BalanceConfig) -> Result<BalancedMatch> {
    let mut best: Option<SplitCandidate> = None;
    let mut examined = 0usize;

    for split in presorted_splits(roster)? {
        examined += 1;
        let Some(candidate) = evaluate_split(roster, &split, config)? else {
            continue;
        };

        let stop_early = config.early_exit
            && candidate.off_role_diff == 0
            && candidate.gap <= config.early_exit_gap;

        if best
            .as_ref()
            .map_or(true, |b| ranks_higher(&candidate, b, config))
        {
            best = Some(candidate);
        }

        if stop_early {
            debug!(examined, "Early exit: found split within gap threshold");
            break;
        }
    }

    match best {
        Some(candidate) => {
            info!(
                gap = candidate.gap,
                examined, "Selected best split"
            );
            Ok(candidate.into_match())
        }
        None => Err(BalancerError::NoValidSplit {
            splits_examined: examined,
        }
        .into()),
    }
}

/// Rank all valid splits and return the top K (`config.top_k`).
///
/// Always evaluates every split; early exit applies only to [`select_best`].
pub fn rank_splits(
    roster: &[ParticipantProfile],
    config: &BalanceConfig,
) -> Result<Vec<SplitCandidate>> {
    let mut candidates = Vec::new();
    let mut examined = 0usize;

    for split in presorted_splits(roster)? {
        examined += 1;
        if let Some(candidate) = evaluate_split(roster, &split, config)? {
            candidates.push(candidate);
        }
    }

    if candidates.is_empty() {
        return Err(BalancerError::NoValidSplit {
            splits_examined: examined,
        }
        .into());
    }

    match config.ranking_strategy {
        RankingStrategy::BalanceFirst => candidates.sort_by_key(|c| c.gap),
        RankingStrategy::PreferenceFirst => {
            candidates.sort_by_key(|c| (-c.preference_score, c.gap))
        }
    }
    candidates.truncate(config.top_k);
    Ok(candidates)
}

/// Whether `a` outranks `b` under the configured strategy
fn ranks_higher(a: &SplitCandidate, b: &SplitCandidate, config: &BalanceConfig) -> bool {
    match config.ranking_strategy {
        RankingStrategy::BalanceFirst => a.gap < b.gap,
        RankingStrategy::PreferenceFirst => {
            (-a.preference_score, a.gap) < (-b.preference_score, b.gap)
        }
    }
}

/// Enumerate splits ordered by how balanced they look before assignment:
/// ascending distance of team A's summed best rating from half the roster
/// total. A cheap heuristic that puts promising splits first.
fn presorted_splits(roster: &[ParticipantProfile]) -> Result<Vec<TeamSplit>> {
    let half_total: i64 = roster.iter().map(|p| p.best_rating() as i64).sum::<i64>() / 2;

    let mut splits: Vec<TeamSplit> = enumerate_splits(roster.len())?.collect();
    splits.sort_by_key(|split| {
        let team_a_best: i64 = split
            .team_a
            .iter()
            .map(|&i| roster[i].best_rating() as i64)
            .sum();
        (team_a_best - half_total).abs()
    });
    Ok(splits)
}

/// Assign both teams of one split and apply the fairness constraints.
/// Returns None when the split is excluded.
fn evaluate_split(
    roster: &[ParticipantProfile],
    split: &TeamSplit,
    config: &BalanceConfig,
) -> Result<Option<SplitCandidate>> {
    let team_a: Vec<&ParticipantProfile> = split.team_a.iter().map(|&i| &roster[i]).collect();
    let team_b: Vec<&ParticipantProfile> = split.team_b.iter().map(|&i| &roster[i]).collect();

    let assignment_a = assign_roles(&team_a, config)?;
    let assignment_b = assign_roles(&team_b, config)?;

    // Hard cap: neither team may field more than the allowed off-role count
    if assignment_a.off_role_count > config.off_role_cap
        || assignment_b.off_role_count > config.off_role_cap
    {
        return Ok(None);
    }

    let off_role_diff = assignment_a.off_role_count.abs_diff(assignment_b.off_role_count);

    // Balance-first additionally demands symmetric off-role burden
    if config.ranking_strategy == RankingStrategy::BalanceFirst && off_role_diff != 0 {
        return Ok(None);
    }

    let gap = rating_gap(assignment_a.total_rating, assignment_b.total_rating);
    let preference_score = preference_score(&team_a, &assignment_a, &config.preference_weights)
        + preference_score(&team_b, &assignment_b, &config.preference_weights);

    Ok(Some(SplitCandidate {
        team_a: assignment_a,
        team_b: assignment_b,
        gap,
        off_role_diff,
        preference_score,
    }))
}

/// Sum the preference-tier weights for one assigned team. Fill preferences
/// count as satisfied at the tier they occupy.
fn preference_score(
    team: &[&ParticipantProfile],
    assignment: &RoleAssignment,
    weights: &PreferenceWeights,
) -> i32 {
    assignment
        .slots
        .iter()
        .map(|slot| {
            // Teams are five strong, linear lookup is fine
            let profile = team
                .iter()
                .find(|p| p.id == slot.participant_id)
                .expect("assigned participant comes from this team");

            if profile.primary.is_role(slot.role) || profile.primary.is_fill() {
                weights.primary
            } else if profile.secondary.is_role(slot.role) || profile.secondary.is_fill() {
                weights.secondary
            } else {
                weights.off_role
            }
        })
        .sum()
}
