//! Configuration management for the team balancer
//!
//! This module holds all tunable constants: the seeding tables, the
//! optimizer bonuses and fairness caps, and the post-match rating formula.

pub mod app;
pub mod balance;
pub mod rating;
pub mod seeding;

// Re-export commonly used types
pub use app::{validate_config, BalancerConfig};
pub use balance::{AssignmentStrategy, BalanceConfig, RankingStrategy};
pub use rating::RatingConfig;
pub use seeding::{Division, SeedingConfig, Tier};
