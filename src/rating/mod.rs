//! Post-match rating updates

pub mod update;

// Re-export commonly used items
pub use update::apply_match_outcome;
