//! Team balancing: split enumeration, role assignment, split selection

pub mod assignment;
pub mod selection;
pub mod splits;

// Re-export commonly used items
pub use assignment::assign_roles;
pub use selection::{rank_splits, select_best, SplitCandidate};
pub use splits::{enumerate_splits, SPLIT_COUNT};
