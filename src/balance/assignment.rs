//! Optimal role-to-participant assignment within one team
//!
//! Builds a 5x5 score matrix (rating plus preference bonus) and solves for
//! the score-maximizing bijection. Two interchangeable strategies exist:
//! Kuhn-Munkres matching and exhaustive permutation search. They must agree
//! on the optimum for every input; the reported total always uses raw
//! ratings with bonuses excluded.

use crate::config::balance::{AssignmentStrategy, BalanceConfig};
use crate::error::{BalancerError, Result};
use crate::types::{AssignedSlot, ParticipantProfile, Role, RoleAssignment, TEAM_SIZE};
use itertools::Itertools;
use pathfinding::kuhn_munkres::kuhn_munkres;
use pathfinding::matrix::Matrix;

/// Score one participant for one role: raw rating plus preference bonus.
/// The bonus is selection pressure only and never reaches reported totals.
fn score(profile: &ParticipantProfile, role: Role, config: &BalanceConfig) -> i32 {
    let bonus = if profile.primary.is_role(role) {
        config.primary_bonus
    } else if profile.secondary.is_role(role) {
        config.secondary_bonus
    } else {
        0
    };
    profile.ratings.get(role) + bonus
}

/// Compute the rating-maximizing role assignment for a team of five.
pub fn assign_roles(team: &[&ParticipantProfile], config: &BalanceConfig) -> Result<RoleAssignment> {
    if team.len() != TEAM_SIZE {
        return Err(BalancerError::InvalidTeamSize {
            expected: TEAM_SIZE,
            actual: team.len(),
        }
        .into());
    }

    let participant_for_role = match config.assignment_strategy {
        AssignmentStrategy::Hungarian => solve_hungarian(team, config),
        AssignmentStrategy::Exhaustive => solve_exhaustive(team, config),
    };

    let mut slots = Vec::with_capacity(TEAM_SIZE);
    let mut total_rating = 0;
    let mut off_role_count = 0;

    for role in Role::ALL {
        let profile = team[participant_for_role[role.index()]];
        let rating = profile.ratings.get(role);
        let off_role = profile.is_off_role(role, config.off_role_threshold);

        total_rating += rating;
        if off_role {
            off_role_count += 1;
        }
        slots.push(AssignedSlot {
            role,
            participant_id: profile.id.clone(),
            rating,
            off_role,
        });
    }

    Ok(RoleAssignment {
        slots,
        total_rating,
        off_role_count,
    })
}

/// Kuhn-Munkres on the score matrix. Rows are participants in the given
/// order, columns are roles in `Role::ALL` order, so results are stable.
fn solve_hungarian(team: &[&ParticipantProfile], config: &BalanceConfig) -> [usize; TEAM_SIZE] {
    let weights = Matrix::from_fn(TEAM_SIZE, TEAM_SIZE, |(row, col)| {
        score(team[row], Role::ALL[col], config) as i64
    });

    // assignments[participant] = role index
    let (_, assignments) = kuhn_munkres(&weights);

    let mut participant_for_role = [0usize; TEAM_SIZE];
    for (participant_idx, role_idx) in assignments.into_iter().enumerate() {
        participant_for_role[role_idx] = participant_idx;
    }
    participant_for_role
}

/// Enumerate all 120 bijections in ascending role-index, ascending
/// participant-index order; strict improvement keeps the first optimum found.
fn solve_exhaustive(team: &[&ParticipantProfile], config: &BalanceConfig) -> [usize; TEAM_SIZE] {
    let mut best: Option<([usize; TEAM_SIZE], i32)> = None;

    for perm in (0..TEAM_SIZE).permutations(TEAM_SIZE) {
        let total: i32 = Role::ALL
            .iter()
            .map(|&role| score(team[perm[role.index()]], role, config))
            .sum();

        if best.map_or(true, |(_, best_total)| total > best_total) {
            let mut assignment = [0usize; TEAM_SIZE];
            assignment.copy_from_slice(&perm);
            best = Some((assignment, total));
        }
    }

    // 120 candidates were examined, so best is always set
    best.map(|(assignment, _)| assignment).unwrap_or([0, 1, 2, 3, 4])
}
