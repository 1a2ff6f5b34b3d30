//! Top-level balancer configuration
//!
//! This module ties the seeding, balancing, and rating configuration
//! together, with environment variable overrides, TOML file loading, and
//! validation.

use crate::config::balance::{AssignmentStrategy, BalanceConfig, RankingStrategy};
use crate::config::rating::RatingConfig;
use crate::config::seeding::SeedingConfig;
use crate::error::BalancerError;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main balancer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    pub seeding: SeedingConfig,
    pub balance: BalanceConfig,
    pub rating: RatingConfig,
}

impl BalancerConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(strategy) = env::var("BALANCER_RANKING_STRATEGY") {
            config.balance.ranking_strategy = match strategy.to_lowercase().as_str() {
                "balance-first" | "balance_first" => RankingStrategy::BalanceFirst,
                "preference-first" | "preference_first" => RankingStrategy::PreferenceFirst,
                _ => return Err(anyhow!("Invalid BALANCER_RANKING_STRATEGY value: {}", strategy)),
            };
        }
        if let Ok(strategy) = env::var("BALANCER_ASSIGNMENT_STRATEGY") {
            config.balance.assignment_strategy = match strategy.to_lowercase().as_str() {
                "hungarian" => AssignmentStrategy::Hungarian,
                "exhaustive" => AssignmentStrategy::Exhaustive,
                _ => {
                    return Err(anyhow!(
                        "Invalid BALANCER_ASSIGNMENT_STRATEGY value: {}",
                        strategy
                    ))
                }
            };
        }
        if let Ok(cap) = env::var("BALANCER_OFF_ROLE_CAP") {
            config.balance.off_role_cap = cap
                .parse()
                .map_err(|_| anyhow!("Invalid BALANCER_OFF_ROLE_CAP value: {}", cap))?;
        }
        if let Ok(threshold) = env::var("BALANCER_OFF_ROLE_THRESHOLD") {
            config.balance.off_role_threshold = threshold
                .parse()
                .map_err(|_| anyhow!("Invalid BALANCER_OFF_ROLE_THRESHOLD value: {}", threshold))?;
        }
        if let Ok(early_exit) = env::var("BALANCER_EARLY_EXIT") {
            config.balance.early_exit = early_exit
                .parse()
                .map_err(|_| anyhow!("Invalid BALANCER_EARLY_EXIT value: {}", early_exit))?;
        }
        if let Ok(gap) = env::var("BALANCER_EARLY_EXIT_GAP") {
            config.balance.early_exit_gap = gap
                .parse()
                .map_err(|_| anyhow!("Invalid BALANCER_EARLY_EXIT_GAP value: {}", gap))?;
        }
        if let Ok(top_k) = env::var("BALANCER_TOP_K") {
            config.balance.top_k = top_k
                .parse()
                .map_err(|_| anyhow!("Invalid BALANCER_TOP_K value: {}", top_k))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path.as_ref(), e))?;
        let config: Self = toml::from_str(&contents)?;
        validate_config(&config)?;
        Ok(config)
    }
}

fn config_err(message: &str) -> anyhow::Error {
    BalancerError::ConfigurationError {
        message: message.to_string(),
    }
    .into()
}

/// Validate configuration values
pub fn validate_config(config: &BalancerConfig) -> Result<()> {
    // Seeding tables must stay ordered so rank labels map back cleanly
    for pair in config.seeding.tier_bases.windows(2) {
        if pair[0] >= pair[1] {
            return Err(config_err("Tier base ratings must be strictly increasing"));
        }
    }
    for pair in config.seeding.division_offsets.windows(2) {
        if pair[0] < pair[1] {
            return Err(config_err(
                "Division offsets must not increase toward division 4",
            ));
        }
    }
    if config.seeding.secondary_penalty < 0 || config.seeding.off_role_penalty < 0 {
        return Err(config_err("Seeding penalties must be non-negative"));
    }
    if config.seeding.secondary_penalty > config.seeding.off_role_penalty {
        return Err(config_err(
            "Secondary penalty must not exceed the off-role penalty",
        ));
    }

    // Balancing constraints
    if config.balance.off_role_threshold <= 0 {
        return Err(config_err("Off-role threshold must be positive"));
    }
    if config.balance.off_role_cap > crate::types::TEAM_SIZE {
        return Err(config_err("Off-role cap cannot exceed the team size"));
    }
    if config.balance.secondary_bonus > config.balance.primary_bonus {
        return Err(config_err(
            "Secondary bonus must not exceed the primary bonus",
        ));
    }
    if config.balance.top_k == 0 {
        return Err(config_err("Top-K must be greater than 0"));
    }

    // Rating formula
    if config.rating.base_gain <= 0 || config.rating.flat_loss <= 0 {
        return Err(config_err("Rating base gain and flat loss must be positive"));
    }
    if config.rating.max_upset_bonus < 0 {
        return Err(config_err("Max upset bonus must be non-negative"));
    }
    if config.rating.upset_divisor <= 0 {
        return Err(config_err("Upset divisor must be positive"));
    }

    Ok(())
}
