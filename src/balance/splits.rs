//! Enumeration of distinct 5-vs-5 team splits
//!
//! Team labels are arbitrary, so a split and its label-swapped twin are the
//! same partition. Fixing participant 0 onto team A leaves C(9,4) = 126
//! combinatorially distinct splits for a 10-participant roster.

use crate::error::{BalancerError, Result};
use crate::types::{TeamSplit, ROSTER_SIZE, TEAM_SIZE};
use itertools::Itertools;

/// Number of distinct splits for a full roster
pub const SPLIT_COUNT: usize = 126;

/// Enumerate every distinct split of a 10-participant roster.
///
/// Yields `TeamSplit`s of indices into the roster the caller holds. The
/// iterator is finite and restartable (call again for a fresh pass).
pub fn enumerate_splits(roster_len: usize) -> Result<impl Iterator<Item = TeamSplit>> {
    if roster_len != ROSTER_SIZE {
        return Err(BalancerError::InvalidRosterSize {
            expected: ROSTER_SIZE,
            actual: roster_len,
        }
        .into());
    }

    let splits = (1..ROSTER_SIZE).combinations(TEAM_SIZE - 1).map(|rest| {
        let mut team_a = [0usize; TEAM_SIZE];
        team_a[1..].copy_from_slice(&rest);

        let mut team_b = [0usize; TEAM_SIZE];
        let mut b = 0;
        for idx in 1..ROSTER_SIZE {
            if !team_a.contains(&idx) {
                team_b[b] = idx;
                b += 1;
            }
        }

        TeamSplit { team_a, team_b }
    });

    Ok(splits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rejects_wrong_roster_size() {
        assert!(enumerate_splits(9).is_err());
        assert!(enumerate_splits(11).is_err());
        assert!(enumerate_splits(0).is_err());
    }

    #[test]
    fn test_yields_exactly_126_splits() {
        let count = enumerate_splits(ROSTER_SIZE).unwrap().count();
        assert_eq!(count, SPLIT_COUNT);
    }

    #[test]
    fn test_each_split_partitions_the_roster() {
        for split in enumerate_splits(ROSTER_SIZE).unwrap() {
            let a: HashSet<usize> = split.team_a.iter().copied().collect();
            let b: HashSet<usize> = split.team_b.iter().copied().collect();

            assert_eq!(a.len(), TEAM_SIZE);
            assert_eq!(b.len(), TEAM_SIZE);
            assert!(a.is_disjoint(&b));

            let union: HashSet<usize> = a.union(&b).copied().collect();
            assert_eq!(union, (0..ROSTER_SIZE).collect());
        }
    }

    #[test]
    fn test_no_split_repeats_under_label_swap() {
        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        for split in enumerate_splits(ROSTER_SIZE).unwrap() {
            // Canonical form: the sorted team containing participant 0
            let mut canonical = split.team_a.to_vec();
            canonical.sort_unstable();
            assert!(seen.insert(canonical), "duplicate split {split:?}");

            // Participant 0 is always on team A, so no label-swapped twin
            // can ever appear.
            assert!(split.team_a.contains(&0));
        }
        assert_eq!(seen.len(), SPLIT_COUNT);
    }

    #[test]
    fn test_iterator_is_restartable() {
        let first: Vec<TeamSplit> = enumerate_splits(ROSTER_SIZE).unwrap().collect();
        let second: Vec<TeamSplit> = enumerate_splits(ROSTER_SIZE).unwrap().collect();
        assert_eq!(first, second);
    }
}
