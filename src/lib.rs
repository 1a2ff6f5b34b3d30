//! Rift Balancer - Team balancing for 5v5 role-based custom lobbies
//!
//! This crate assigns ten ranked participants to two five-person teams and
//! five distinct roles per team, balancing competitive fairness against
//! individual role preference, and updates per-role ratings after each match.

pub mod balance;
pub mod config;
pub mod error;
pub mod profile;
pub mod rating;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{BalancerError, Result};
pub use types::*;

// Re-export key components
pub use balance::selection::{rank_splits, select_best};
pub use store::{InMemoryRatingStore, RatingStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
