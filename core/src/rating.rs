use serde::{Deserialize, Serialize};

use crate::{Difficulty, MoveCount};

/// Star rating shown on the summary screen once a round is complete.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    stars: u8,
}

impl Rating {
    pub const MAX_STARS: u8 = 3;

    pub fn for_result(difficulty: Difficulty, moves: MoveCount, elapsed_secs: u32) -> Self {
        let move_limit = difficulty.move_threshold();
        let time_limit = difficulty.time_threshold_secs();

        // thresholds are compared in tenths so 1.5x and 1.3x stay integral
        let stars = if moves <= move_limit && elapsed_secs <= time_limit {
            3
        } else if moves * 10 <= move_limit * 15 && elapsed_secs * 10 <= time_limit * 13 {
            2
        } else {
            1
        };
        Self { stars }
    }

    pub const fn stars(self) -> u8 {
        self.stars
    }

    pub const fn message(self) -> &'static str {
        match self.stars {
            3 => "Perfect!",
            2 => "Great job!",
            _ => "Well done!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_both_thresholds_is_perfect() {
        let rating = Rating::for_result(Difficulty::Easy, 15, 45);
        assert_eq!(rating.stars(), 3);
        assert_eq!(rating.message(), "Perfect!");
    }

    #[test]
    fn relaxed_thresholds_give_two_stars() {
        // medium: 25 moves * 1.5 = 37.5, 75s * 1.3 = 97.5
        assert_eq!(Rating::for_result(Difficulty::Medium, 37, 97).stars(), 2);
        assert_eq!(Rating::for_result(Difficulty::Medium, 38, 97).stars(), 1);
        assert_eq!(Rating::for_result(Difficulty::Medium, 37, 98).stars(), 1);
    }

    #[test]
    fn slow_hard_round_still_gets_one_star() {
        let rating = Rating::for_result(Difficulty::Hard, 200, 900);
        assert_eq!(rating.stars(), 1);
        assert_eq!(rating.message(), "Well done!");
    }
}
