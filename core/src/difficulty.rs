use serde::{Deserialize, Serialize};

use crate::{MoveCount, PairCount};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn pair_count(self) -> PairCount {
        use Difficulty::*;
        match self {
            Easy => 6,
            Medium => 8,
            Hard => 10,
        }
    }

    /// The tier offered after clearing this one, `None` once at the top.
    pub const fn next(self) -> Option<Self> {
        use Difficulty::*;
        match self {
            Easy => Some(Medium),
            Medium => Some(Hard),
            Hard => None,
        }
    }

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy",
            Medium => "Medium",
            Hard => "Hard",
        }
    }

    pub(crate) const fn time_threshold_secs(self) -> u32 {
        use Difficulty::*;
        match self {
            Easy => 45,
            Medium => 75,
            Hard => 120,
        }
    }

    pub(crate) const fn move_threshold(self) -> MoveCount {
        use Difficulty::*;
        match self {
            Easy => 15,
            Medium => 25,
            Hard => 35,
        }
    }
}

impl core::str::FromStr for Difficulty {
    type Err = &'static str;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(s))
            .ok_or("expected one of: easy, medium, hard")
    }
}
