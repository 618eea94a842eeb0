#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use cue::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use rating::*;
pub use scheduler::*;
pub use state::*;
pub use types::*;

mod card;
mod cue;
mod difficulty;
mod engine;
mod error;
mod generator;
mod rating;
mod scheduler;
mod state;
mod types;

/// Timing knobs for a round, all in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How long two selected cards stay up before they are compared.
    pub resolve_delay_ms: Millis,
    /// Extra wait between the last match and the level complete cue.
    pub completion_cue_delay_ms: Millis,
    pub tick_period_ms: Millis,
}

impl EngineConfig {
    pub const DEFAULT: Self = Self {
        resolve_delay_ms: 1000,
        completion_cue_delay_ms: 500,
        tick_period_ms: 1000,
    };
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A dealt sequence of cards where every symbol appears exactly twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Lays the symbols out in the given order, ids follow positions.
    pub fn from_symbols(symbols: &[Symbol]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(GameError::NoPairs);
        }
        if symbols.len() > Symbol::CATALOG.len() * 2 {
            return Err(GameError::TooManyPairs {
                requested: (symbols.len() / 2).try_into().unwrap_or(PairCount::MAX),
                available: Symbol::CATALOG.len() as PairCount,
            });
        }
        let paired = symbols
            .iter()
            .all(|&symbol| symbols.iter().filter(|&&other| other == symbol).count() == 2);
        if !paired {
            return Err(GameError::InvalidDeck);
        }

        let cards = symbols
            .iter()
            .zip(0..)
            .map(|(&symbol, id)| Card::new(id, symbol))
            .collect();
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> PairCount {
        (self.cards.len() / 2) as PairCount
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Why a flip was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipRejection {
    SelectionFull,
    AlreadySelected,
    AlreadyMatched,
    UnknownCard,
    RoundComplete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    Rejected(FlipRejection),
    /// First card of a selection is up.
    Revealed,
    /// Second card is up, a resolution has been scheduled.
    SelectionComplete,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            Rejected(_) => false,
            Revealed => true,
            SelectionComplete => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Task belonged to an older round or no longer applies.
    Stale,
    Ticked(u32),
    Mismatch,
    Matched,
    /// The last pair was found.
    Completed,
    CueEmitted(Cue),
}

impl TaskOutcome {
    pub const fn has_update(self) -> bool {
        use TaskOutcome::*;
        match self {
            Stale => false,
            Ticked(_) => true,
            Mismatch => true,
            Matched => true,
            Completed => true,
            CueEmitted(_) => false,
        }
    }
}
