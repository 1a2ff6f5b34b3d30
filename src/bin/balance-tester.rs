//! Balance Tester CLI Tool
//!
//! Command-line tool for exercising the balancer against a JSON-backed
//! rating store.
//!
//! Usage:
//!   cargo run --bin balance-tester -- --help
//!   cargo run --bin balance-tester -- balance --roster roster.json --top 3
//!   cargo run --bin balance-tester -- report --outcome outcome.json
//!   cargo run --bin balance-tester -- seed-preview --rank "Gold 2" --primary MID --secondary TOP
//!
//! The roster file is a JSON array of entries:
//!   [{"id": "alice", "rank": "Gold 2", "primary": {"Role": "MID"}, "secondary": "Fill"}, ...]

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rift_balancer::balance::rank_splits;
use rift_balancer::config::{BalancerConfig, RankingStrategy};
use rift_balancer::profile::{
    load_or_seed_roster_with, parse_rank_label, rating_to_rank_label, seed_ratings,
};
use rift_balancer::rating::apply_match_outcome;
use rift_balancer::store::{InMemoryRatingStore, ProfileEntry, RatingStore};
use rift_balancer::types::{MatchOutcome, ParticipantId, RolePreference, RosterEntry};

#[derive(Parser)]
#[command(name = "balance-tester")]
#[command(about = "Team balancing tool for 5v5 custom lobbies with per-role ratings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file backing the rating store
    #[arg(long, default_value = "ratings.json")]
    store: PathBuf,

    /// Optional TOML config file; defaults come from the environment
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Balance a 10-participant roster into two teams
    Balance {
        /// Roster JSON file (array of 10 entries)
        #[arg(short, long)]
        roster: PathBuf,
        /// Ranking strategy (balance-first or preference-first)
        #[arg(long)]
        strategy: Option<String>,
        /// How many ranked options to print
        #[arg(long, default_value = "3")]
        top: usize,
    },
    /// Apply a confirmed match outcome and print rating changes
    Report {
        /// Match outcome JSON file
        #[arg(short, long)]
        outcome: PathBuf,
    },
    /// Print the rating map a new participant would be seeded with
    SeedPreview {
        /// Rank label, e.g. "Gold 2"
        #[arg(long)]
        rank: String,
        /// Primary role preference
        #[arg(long, default_value = "Fill")]
        primary: String,
        /// Secondary role preference
        #[arg(long, default_value = "Fill")]
        secondary: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BalancerConfig::from_toml_file(path)?,
        None => BalancerConfig::from_env()?,
    };

    match cli.command {
        Commands::Balance {
            roster,
            strategy,
            top,
        } => {
            if let Some(strategy) = strategy {
                config.balance.ranking_strategy = match strategy.as_str() {
                    "balance-first" => RankingStrategy::BalanceFirst,
                    "preference-first" => RankingStrategy::PreferenceFirst,
                    other => anyhow::bail!("Unknown ranking strategy: {other}"),
                };
            }
            config.balance.top_k = top;
            run_balance(&cli.store, &roster, &config)
        }
        Commands::Report { outcome } => run_report(&cli.store, &outcome, &config),
        Commands::SeedPreview {
            rank,
            primary,
            secondary,
        } => run_seed_preview(&rank, &primary, &secondary, &config),
    }
}

fn load_store(path: &PathBuf) -> Result<InMemoryRatingStore> {
    if !path.exists() {
        return Ok(InMemoryRatingStore::new());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read store file {path:?}"))?;
    let entries: HashMap<ParticipantId, ProfileEntry> = serde_json::from_str(&contents)?;
    Ok(InMemoryRatingStore::with_entries(entries))
}

fn save_store(path: &PathBuf, store: &InMemoryRatingStore) -> Result<()> {
    let entries = store.all()?;
    std::fs::write(path, serde_json::to_string_pretty(&entries)?)
        .with_context(|| format!("Failed to write store file {path:?}"))?;
    Ok(())
}

fn run_balance(store_path: &PathBuf, roster_path: &PathBuf, config: &BalancerConfig) -> Result<()> {
    let contents = std::fs::read_to_string(roster_path)
        .with_context(|| format!("Failed to read roster file {roster_path:?}"))?;
    let entries: Vec<RosterEntry> = serde_json::from_str(&contents)?;

    let store = load_store(store_path)?;
    let profiles = load_or_seed_roster_with(&store, &entries, &config.seeding)?;

    let ranked = rank_splits(&profiles, &config.balance)?;

    for (i, candidate) in ranked.iter().enumerate() {
        println!("=== Option {} (gap {}) ===", i + 1, candidate.gap);
        for (label, team) in [("Team A", &candidate.team_a), ("Team B", &candidate.team_b)] {
            println!("{label} (total {}):", team.total_rating);
            for slot in &team.slots {
                let rank = rating_to_rank_label(slot.rating, &config.seeding);
                let marker = if slot.off_role { " [off-role]" } else { "" };
                println!(
                    "  {:<8} {} ({} -> {rank}){marker}",
                    slot.role.to_string(),
                    slot.participant_id,
                    slot.rating
                );
            }
        }
        println!();
    }

    // New participants may have been seeded during loading
    save_store(store_path, &store)?;
    Ok(())
}

fn run_report(store_path: &PathBuf, outcome_path: &PathBuf, config: &BalancerConfig) -> Result<()> {
    let contents = std::fs::read_to_string(outcome_path)
        .with_context(|| format!("Failed to read outcome file {outcome_path:?}"))?;
    let outcome: MatchOutcome = serde_json::from_str(&contents)?;

    let store = load_store(store_path)?;
    let report = apply_match_outcome(&outcome, &store, &config.rating)?;

    if !report.role_swaps.is_empty() {
        println!("Role swaps:");
        for swap in &report.role_swaps {
            println!(
                "  {} played {} (expected {}/{})",
                swap.participant_id, swap.actual, swap.expected_primary, swap.expected_secondary
            );
        }
        println!();
    }

    println!("Rating changes:");
    let mut changes: Vec<_> = report.changes.values().collect();
    changes.sort_by_key(|c| -c.delta);
    for change in changes {
        let sign = if change.delta > 0 { "+" } else { "" };
        println!(
            "  {} ({}): {} -> {} ({sign}{})",
            change.participant_id, change.role, change.old_rating, change.new_rating, change.delta
        );
    }

    save_store(store_path, &store)?;
    Ok(())
}

fn run_seed_preview(
    rank: &str,
    primary: &str,
    secondary: &str,
    config: &BalancerConfig,
) -> Result<()> {
    let primary: RolePreference = primary
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid primary preference: {e}"))?;
    let secondary: RolePreference = secondary
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid secondary preference: {e}"))?;

    let (tier, division) = parse_rank_label(rank, &config.seeding);
    let ratings = seed_ratings(tier, division, primary, secondary, &config.seeding);

    println!("Seeded ratings for {tier} (primary {primary}, secondary {secondary}):");
    for (role, rating) in ratings.iter() {
        println!(
            "  {:<8} {} ({})",
            role.to_string(),
            rating,
            rating_to_rank_label(rating, &config.seeding)
        );
    }
    Ok(())
}
