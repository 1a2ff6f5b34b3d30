//! Utility functions for the team balancer

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Absolute difference between two rating totals
pub fn rating_gap(total_a: i32, total_b: i32) -> i32 {
    (total_a - total_b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_ids() {
        let id1 = generate_match_id();
        let id2 = generate_match_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_rating_gap() {
        assert_eq!(rating_gap(7500, 7300), 200);
        assert_eq!(rating_gap(7300, 7500), 200);
        assert_eq!(rating_gap(7500, 7500), 0);
    }
}
