//! Post-match rating formula constants
//!
//! Winners gain `base_gain + clamp(0, max_upset_bonus, diff / upset_divisor)`
//! against the opponent who played the same role; losers lose `flat_loss`.

use serde::{Deserialize, Serialize};

/// Tunable rating-delta constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingConfig {
    pub base_gain: i32,
    pub max_upset_bonus: i32,
    pub upset_divisor: i32,
    pub flat_loss: i32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            base_gain: 25,
            max_upset_bonus: 35,
            upset_divisor: 100,
            flat_loss: 25,
        }
    }
}

impl RatingConfig {
    /// Gain for a winner rated `winner_rating` against an opponent rated
    /// `opponent_rating` in the same role. Always in
    /// `[base_gain, base_gain + max_upset_bonus]`.
    pub fn winner_gain(&self, winner_rating: i32, opponent_rating: i32) -> i32 {
        let diff = opponent_rating - winner_rating;
        let bonus = (diff.div_euclid(self.upset_divisor)).clamp(0, self.max_upset_bonus);
        self.base_gain + bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_gain_bounds() {
        let config = RatingConfig::default();
        // Even match
        assert_eq!(config.winner_gain(1500, 1500), 25);
        // Upset: 500 points up
        assert_eq!(config.winner_gain(1500, 2000), 30);
        // Favored winner gets no bonus, never below base
        assert_eq!(config.winner_gain(2000, 1500), 25);
        // Bonus caps at 35
        assert_eq!(config.winner_gain(0, 100_000), 60);
    }
}
