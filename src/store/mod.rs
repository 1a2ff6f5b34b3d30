//! Rating store interface and implementations
//!
//! This module defines the interface for persisting and retrieving
//! participant profiles, with an in-memory implementation and a mock for
//! testing. Profiles are seeded exactly once; after that only the rating
//! for the role actually played is mutated.

use crate::error::{BalancerError, Result};
use crate::types::{ParticipantId, ParticipantProfile, Role};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage entry for a participant's profile with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub profile: ParticipantProfile,
    pub games_played: u64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ProfileEntry {
    /// Create a new entry for a freshly seeded participant
    pub fn new(profile: ParticipantProfile) -> Self {
        let now = current_timestamp();
        Self {
            profile,
            games_played: 0,
            last_updated: now,
            created_at: now,
        }
    }

    /// Apply a confirmed post-match rating for one role
    pub fn apply_update(&mut self, role: Role, new_rating: i32) {
        self.profile.ratings.set(role, new_rating);
        self.games_played += 1;
        self.last_updated = current_timestamp();
    }
}

/// Trait for rating store operations
pub trait RatingStore: Send + Sync {
    /// Get a participant's profile entry
    fn get(&self, participant_id: &ParticipantId) -> Result<Option<ProfileEntry>>;

    /// Get entries for multiple participants
    fn get_many(
        &self,
        participant_ids: &[ParticipantId],
    ) -> Result<HashMap<ParticipantId, ProfileEntry>>;

    /// Seed a new participant. Returns true if the profile was inserted,
    /// false if one already existed (existing profiles are never overwritten).
    fn seed(&self, profile: ParticipantProfile) -> Result<bool>;

    /// Persist the post-match rating for exactly one role
    fn update_rating(
        &self,
        participant_id: &ParticipantId,
        role: Role,
        new_rating: i32,
    ) -> Result<()>;

    /// Get all stored entries (for admin/debugging)
    fn all(&self) -> Result<HashMap<ParticipantId, ProfileEntry>>;

    /// Get total number of stored participants
    fn count(&self) -> Result<usize>;
}

/// In-memory rating store implementation
#[derive(Debug, Default)]
pub struct InMemoryRatingStore {
    entries: RwLock<HashMap<ParticipantId, ProfileEntry>>,
}

impl InMemoryRatingStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store prepopulated with the given entries
    pub fn with_entries(entries: HashMap<ParticipantId, ProfileEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl RatingStore for InMemoryRatingStore {
    fn get(&self, participant_id: &ParticipantId) -> Result<Option<ProfileEntry>> {
        let entries = self.entries.read().map_err(|_| BalancerError::InternalError {
            message: "Failed to acquire store read lock".to_string(),
        })?;

        Ok(entries.get(participant_id).cloned())
    }

    fn get_many(
        &self,
        participant_ids: &[ParticipantId],
    ) -> Result<HashMap<ParticipantId, ProfileEntry>> {
        let entries = self.entries.read().map_err(|_| BalancerError::InternalError {
            message: "Failed to acquire store read lock".to_string(),
        })?;

        let mut result = HashMap::new();
        for participant_id in participant_ids {
            if let Some(entry) = entries.get(participant_id) {
                result.insert(participant_id.clone(), entry.clone());
            }
        }

        Ok(result)
    }

    fn seed(&self, profile: ParticipantProfile) -> Result<bool> {
        let mut entries = self.entries.write().map_err(|_| BalancerError::InternalError {
            message: "Failed to acquire store write lock".to_string(),
        })?;

        if entries.contains_key(&profile.id) {
            return Ok(false);
        }

        entries.insert(profile.id.clone(), ProfileEntry::new(profile));
        Ok(true)
    }

    fn update_rating(
        &self,
        participant_id: &ParticipantId,
        role: Role,
        new_rating: i32,
    ) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| BalancerError::InternalError {
            message: "Failed to acquire store write lock".to_string(),
        })?;

        let entry = entries
            .get_mut(participant_id)
            .ok_or_else(|| BalancerError::MissingParticipant {
                participant_id: participant_id.clone(),
            })?;

        entry.apply_update(role, new_rating);
        Ok(())
    }

    fn all(&self) -> Result<HashMap<ParticipantId, ProfileEntry>> {
        let entries = self.entries.read().map_err(|_| BalancerError::InternalError {
            message: "Failed to acquire store read lock".to_string(),
        })?;

        Ok(entries.clone())
    }

    fn count(&self) -> Result<usize> {
        let entries = self.entries.read().map_err(|_| BalancerError::InternalError {
            message: "Failed to acquire store read lock".to_string(),
        })?;

        Ok(entries.len())
    }
}

/// Mock rating store for testing
#[derive(Debug, Default)]
pub struct MockRatingStore {
    inner: InMemoryRatingStore,
    seed_calls: RwLock<Vec<ParticipantId>>,
    update_calls: RwLock<Vec<(ParticipantId, Role, i32)>>,
}

impl MockRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset profiles for testing
    pub fn preset_profiles(&self, profiles: Vec<ParticipantProfile>) -> Result<()> {
        for profile in profiles {
            self.inner.seed(profile)?;
        }
        Ok(())
    }

    /// Get all seed calls made (for testing)
    pub fn get_seed_calls(&self) -> Vec<ParticipantId> {
        self.seed_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Get all update calls made (for testing)
    pub fn get_update_calls(&self) -> Vec<(ParticipantId, Role, i32)> {
        self.update_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl RatingStore for MockRatingStore {
    fn get(&self, participant_id: &ParticipantId) -> Result<Option<ProfileEntry>> {
        self.inner.get(participant_id)
    }

    fn get_many(
        &self,
        participant_ids: &[ParticipantId],
    ) -> Result<HashMap<ParticipantId, ProfileEntry>> {
        self.inner.get_many(participant_ids)
    }

    fn seed(&self, profile: ParticipantProfile) -> Result<bool> {
        if let Ok(mut calls) = self.seed_calls.write() {
            calls.push(profile.id.clone());
        }
        self.inner.seed(profile)
    }

    fn update_rating(
        &self,
        participant_id: &ParticipantId,
        role: Role,
        new_rating: i32,
    ) -> Result<()> {
        if let Ok(mut calls) = self.update_calls.write() {
            calls.push((participant_id.clone(), role, new_rating));
        }
        self.inner.update_rating(participant_id, role, new_rating)
    }

    fn all(&self) -> Result<HashMap<ParticipantId, ProfileEntry>> {
        self.inner.all()
    }

    fn count(&self) -> Result<usize> {
        self.inner.count()
    }
}
