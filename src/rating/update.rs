//! Rating update engine
//!
//! Consumes a finalized match outcome (roles as actually played) and the
//! stored profiles, pairs each winner against the loser who played the same
//! role, and computes signed rating deltas. The full delta map is built
//! before anything is persisted, so a failed lookup leaves the store
//! untouched. Only the rating for the role actually played is mutated.

use crate::config::rating::RatingConfig;
use crate::error::{BalancerError, Result};
use crate::store::{ProfileEntry, RatingStore};
use crate::types::{
    MatchOutcome, ParticipantId, PlayedSlot, RatingChange, RatingUpdateReport, RoleSwap, TEAM_SIZE,
};
use std::collections::HashMap;
use tracing::{info, warn};

/// Apply a confirmed match outcome: compute every rating delta, detect role
/// swaps, then persist exactly one role rating per changed participant.
pub fn apply_match_outcome(
    outcome: &MatchOutcome,
    store: &dyn RatingStore,
    config: &RatingConfig,
) -> Result<RatingUpdateReport> {
    validate_teams(outcome)?;

    let profiles = load_profiles(outcome, store)?;

    let role_swaps = detect_role_swaps(outcome, &profiles);
    let changes = compute_changes(outcome, &profiles, config)?;

    // All deltas computed; only now touch the store
    for change in changes.values() {
        store.update_rating(&change.participant_id, change.role, change.new_rating)?;
    }

    info!(
        match_id = %outcome.match_id,
        updated = changes.len(),
        role_swaps = role_swaps.len(),
        "Applied match outcome"
    );

    Ok(RatingUpdateReport {
        match_id: outcome.match_id,
        changes,
        role_swaps,
    })
}

fn validate_teams(outcome: &MatchOutcome) -> Result<()> {
    // Duplicate roles within a team are tolerated here: outcomes come from
    // an imperfect external result source, and unpaired winners are skipped
    // later. Only team size and duplicate identities are fatal up front.
    for team in [&outcome.winning_team, &outcome.losing_team] {
        if team.len() != TEAM_SIZE {
            return Err(BalancerError::InvalidTeamSize {
                expected: TEAM_SIZE,
                actual: team.len(),
            }
            .into());
        }
    }

    let mut ids: Vec<&ParticipantId> = outcome
        .winning_team
        .iter()
        .chain(outcome.losing_team.iter())
        .map(|slot| &slot.participant_id)
        .collect();
    ids.sort();
    ids.dedup();
    if ids.len() != 2 * TEAM_SIZE {
        return Err(BalancerError::MalformedOutcome {
            reason: "A participant appears more than once in the outcome".to_string(),
        }
        .into());
    }

    Ok(())
}

fn load_profiles(
    outcome: &MatchOutcome,
    store: &dyn RatingStore,
) -> Result<HashMap<ParticipantId, ProfileEntry>> {
    let ids: Vec<ParticipantId> = outcome
        .winning_team
        .iter()
        .chain(outcome.losing_team.iter())
        .map(|slot| slot.participant_id.clone())
        .collect();

    let profiles = store.get_many(&ids)?;
    for id in &ids {
        if !profiles.contains_key(id) {
            return Err(BalancerError::MissingParticipant {
                participant_id: id.clone(),
            }
            .into());
        }
    }
    Ok(profiles)
}

/// Flag everyone whose actual role matches neither stated preference (a
/// Fill primary waives the check).
fn detect_role_swaps(
    outcome: &MatchOutcome,
    profiles: &HashMap<ParticipantId, ProfileEntry>,
) -> Vec<RoleSwap> {
    outcome
        .winning_team
        .iter()
        .chain(outcome.losing_team.iter())
        .filter_map(|slot| {
            let profile = &profiles.get(&slot.participant_id)?.profile;
            profile.is_unexpected_role(slot.role).then(|| RoleSwap {
                participant_id: slot.participant_id.clone(),
                expected_primary: profile.primary,
                expected_secondary: profile.secondary,
                actual: slot.role,
            })
        })
        .collect()
}

fn compute_changes(
    outcome: &MatchOutcome,
    profiles: &HashMap<ParticipantId, ProfileEntry>,
    config: &RatingConfig,
) -> Result<HashMap<ParticipantId, RatingChange>> {
    let mut changes = HashMap::new();

    for winner in &outcome.winning_team {
        // Pair against the loser who played the same actual role
        let Some(loser) = find_by_role(&outcome.losing_team, winner) else {
            warn!(
                participant = %winner.participant_id,
                role = %winner.role,
                "No role-matched opponent; pairing skipped"
            );
            continue;
        };

        let winner_rating = profiles[&winner.participant_id]
            .profile
            .ratings
            .get(winner.role);
        let loser_rating = profiles[&loser.participant_id]
            .profile
            .ratings
            .get(winner.role);

        let gain = config.winner_gain(winner_rating, loser_rating);

        changes.insert(
            winner.participant_id.clone(),
            RatingChange {
                participant_id: winner.participant_id.clone(),
                role: winner.role,
                delta: gain,
                old_rating: winner_rating,
                new_rating: winner_rating + gain,
                opponent_id: loser.participant_id.clone(),
            },
        );
        changes.insert(
            loser.participant_id.clone(),
            RatingChange {
                participant_id: loser.participant_id.clone(),
                role: winner.role,
                delta: -config.flat_loss,
                old_rating: loser_rating,
                new_rating: loser_rating - config.flat_loss,
                opponent_id: winner.participant_id.clone(),
            },
        );
    }

    // Partial mismatches are tolerated; a match with no pairing at all is not
    if changes.is_empty() {
        return Err(BalancerError::MalformedOutcome {
            reason: "No winner has a role-matched opponent".to_string(),
        }
        .into());
    }

    Ok(changes)
}

fn find_by_role<'a>(team: &'a [PlayedSlot], reference: &PlayedSlot) -> Option<&'a PlayedSlot> {
    team.iter().find(|slot| slot.role == reference.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryRatingStore, MockRatingStore};
    use crate::types::{ParticipantProfile, RatingMap, Role, RolePreference};
    use crate::utils::generate_match_id;

    fn seeded_store(ratings: &[(&str, i32)]) -> InMemoryRatingStore {
        let store = InMemoryRatingStore::new();
        for (id, rating) in ratings {
            store
                .seed(ParticipantProfile::new(
                    *id,
                    RatingMap::uniform(*rating),
                    RolePreference::Role(Role::Mid),
                    RolePreference::Fill,
                ))
                .unwrap();
        }
        store
    }

    fn team(prefix: &str) -> Vec<PlayedSlot> {
        Role::ALL
            .iter()
            .map(|&role| PlayedSlot {
                participant_id: format!("{prefix}-{role}"),
                role,
            })
            .collect()
    }

    fn full_outcome() -> (MatchOutcome, InMemoryRatingStore) {
        let outcome = MatchOutcome {
            match_id: generate_match_id(),
            winning_team: team("w"),
            losing_team: team("l"),
        };
        let entries: Vec<(String, i32)> = outcome
            .winning_team
            .iter()
            .map(|s| (s.participant_id.clone(), 1500))
            .chain(outcome.losing_team.iter().map(|s| (s.participant_id.clone(), 2000)))
            .collect();
        let refs: Vec<(&str, i32)> = entries.iter().map(|(id, r)| (id.as_str(), *r)).collect();
        (outcome, seeded_store(&refs))
    }

    #[test]
    fn test_underdog_win_gains_bonus() {
        let (outcome, store) = full_outcome();
        let report = apply_match_outcome(&outcome, &store, &RatingConfig::default()).unwrap();

        assert_eq!(report.changes.len(), 10);

        // Winners at 1500 beat losers at 2000: gain = 25 + 500/100 = 30
        for slot in &outcome.winning_team {
            let change = &report.changes[&slot.participant_id];
            assert_eq!(change.delta, 30);
            assert_eq!(change.new_rating, 1530);
        }
        // Losers always drop a flat 25
        for slot in &outcome.losing_team {
            let change = &report.changes[&slot.participant_id];
            assert_eq!(change.delta, -25);
            assert_eq!(change.new_rating, 1975);
        }
    }

    #[test]
    fn test_only_actual_role_is_mutated() {
        let (outcome, store) = full_outcome();
        apply_match_outcome(&outcome, &store, &RatingConfig::default()).unwrap();

        let winner_top = store.get(&"w-Top".to_string()).unwrap().unwrap();
        assert_eq!(winner_top.profile.ratings.get(Role::Top), 1530);
        for role in [Role::Jungle, Role::Mid, Role::Adc, Role::Support] {
            assert_eq!(winner_top.profile.ratings.get(role), 1500);
        }
        assert_eq!(winner_top.games_played, 1);
    }

    #[test]
    fn test_role_swaps_are_flagged() {
        let (outcome, store) = full_outcome();
        let report = apply_match_outcome(&outcome, &store, &RatingConfig::default()).unwrap();

        // Every profile has primary Mid with a Fill secondary; a Fill
        // secondary does not waive the check, so the 8 participants who
        // played something other than Mid are flagged.
        assert_eq!(report.role_swaps.len(), 8);
        assert!(report
            .role_swaps
            .iter()
            .all(|swap| swap.actual != Role::Mid));
    }

    #[test]
    fn test_missing_participant_leaves_store_untouched() {
        let outcome = MatchOutcome {
            match_id: generate_match_id(),
            winning_team: team("w"),
            losing_team: team("l"),
        };

        // Seed everyone except one loser
        let store = MockRatingStore::new();
        for slot in outcome.winning_team.iter().chain(outcome.losing_team.iter().skip(1)) {
            store
                .seed(ParticipantProfile::new(
                    slot.participant_id.clone(),
                    RatingMap::uniform(1500),
                    RolePreference::Fill,
                    RolePreference::Fill,
                ))
                .unwrap();
        }

        let result = apply_match_outcome(&outcome, &store, &RatingConfig::default());
        assert!(result.is_err());
        // Zero stored side effects on failure
        assert!(store.get_update_calls().is_empty());
    }

    #[test]
    fn test_unpaired_winner_is_skipped() {
        // The losing team's reported roles double up on Top, so nobody
        // played Jungle against the winning jungler. That pairing is
        // skipped; the other four settle normally.
        let (outcome, store) = full_outcome();
        let mut losing = outcome.losing_team.clone();
        losing[1].role = Role::Top; // was Jungle
        let outcome = MatchOutcome {
            losing_team: losing,
            ..outcome
        };

        let report = apply_match_outcome(&outcome, &store, &RatingConfig::default()).unwrap();
        // Winning jungler got no pairing, and the second reported Top on
        // the losing side was never matched either: 8 changes, not 10.
        assert_eq!(report.changes.len(), 8);
        assert!(!report.changes.contains_key("w-Jungle"));
        assert!(!report.changes.contains_key("l-Jungle"));
    }

    #[test]
    fn test_no_pairing_at_all_is_malformed() {
        // Winners all reported Support and losers all Top: no role is
        // shared across the teams, so not a single pairing exists.
        let (outcome, store) = full_outcome();
        let losing: Vec<PlayedSlot> = outcome
            .losing_team
            .iter()
            .map(|slot| PlayedSlot {
                participant_id: slot.participant_id.clone(),
                role: Role::Top,
            })
            .collect();
        let winning: Vec<PlayedSlot> = outcome
            .winning_team
            .iter()
            .map(|slot| PlayedSlot {
                participant_id: slot.participant_id.clone(),
                role: Role::Support,
            })
            .collect();
        let outcome = MatchOutcome {
            winning_team: winning,
            losing_team: losing,
            ..outcome
        };

        let result = apply_match_outcome(&outcome, &store, &RatingConfig::default());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Malformed match outcome"));
        // And nothing was persisted
        assert_eq!(store.get(&"w-Top".to_string()).unwrap().unwrap().games_played, 0);
    }

    #[test]
    fn test_rejects_short_team() {
        let (outcome, store) = full_outcome();
        let mut winning = outcome.winning_team.clone();
        winning.pop();
        let outcome = MatchOutcome {
            winning_team: winning,
            ..outcome
        };
        assert!(apply_match_outcome(&outcome, &store, &RatingConfig::default()).is_err());
    }

    #[test]
    fn test_rejects_duplicate_participant() {
        let (outcome, store) = full_outcome();
        let mut winning = outcome.winning_team.clone();
        winning[1].participant_id = winning[0].participant_id.clone();
        let outcome = MatchOutcome {
            winning_team: winning,
            ..outcome
        };
        assert!(apply_match_outcome(&outcome, &store, &RatingConfig::default()).is_err());
    }

    #[test]
    fn test_gain_is_bounded() {
        let config = RatingConfig::default();
        for (winner, loser) in [(1500, 1500), (1500, 2000), (2000, 1500), (0, 100_000)] {
            let gain = config.winner_gain(winner, loser);
            assert!((25..=60).contains(&gain));
        }
    }
}
