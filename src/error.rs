//! Error types for the team balancer
//!
//! This module defines all error types using anyhow for consistent error
//! handling throughout the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific balancing scenarios
#[derive(Debug, thiserror::Error)]
pub enum BalancerError {
    #[error("Invalid roster size: expected {expected}, got {actual}")]
    InvalidRosterSize { expected: usize, actual: usize },

    #[error("Invalid team size: expected {expected}, got {actual}")]
    InvalidTeamSize { expected: usize, actual: usize },

    #[error("No valid split found: all {splits_examined} splits excluded by constraints")]
    NoValidSplit { splits_examined: usize },

    #[error("Participant not found in rating store: {participant_id}")]
    MissingParticipant { participant_id: String },

    #[error("Malformed match outcome: {reason}")]
    MalformedOutcome { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
