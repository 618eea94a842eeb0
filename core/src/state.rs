use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Face-up cards still waiting to be compared, in flip order.
pub type Selection = SmallVec<[CardId; 2]>;

/// Round lifecycle: `Idle -> Running -> Complete`, only a reset leaves `Complete`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Complete,
}

impl Phase {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Snapshot of a round as seen by the presentation and audio layers.
///
/// Only the engine writes to it. Cards keep their identity and symbol for the whole round, only the flipped and
/// matched flags change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameState {
    pub(crate) cards: Vec<Card>,
    pub(crate) selection: Selection,
    pub(crate) moves: MoveCount,
    pub(crate) matches_found: PairCount,
    pub(crate) elapsed_secs: u32,
    pub(crate) total_pairs: PairCount,
    pub(crate) is_active: bool,
    pub(crate) is_complete: bool,
}

impl GameState {
    pub fn new(deck: Deck) -> Self {
        let total_pairs = deck.pair_count();
        Self {
            cards: deck.into_cards(),
            selection: Selection::new(),
            moves: 0,
            matches_found: 0,
            elapsed_secs: 0,
            total_pairs,
            is_active: false,
            is_complete: false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<Card> {
        self.cards.get(id.to_index()).copied()
    }

    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    pub fn moves(&self) -> MoveCount {
        self.moves
    }

    pub fn matches_found(&self) -> PairCount {
        self.matches_found
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn total_pairs(&self) -> PairCount {
        self.total_pairs
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Two cards are up and waiting, further flips are refused until they resolve.
    pub fn is_flip_disabled(&self) -> bool {
        self.selection.len() >= 2
    }

    pub fn is_game_complete(&self) -> bool {
        self.is_complete
    }

    pub fn phase(&self) -> Phase {
        match (self.is_active, self.is_complete) {
            (_, true) => Phase::Complete,
            (true, false) => Phase::Running,
            (false, false) => Phase::Idle,
        }
    }

    /// Cards that are face up but not yet matched, never more than two.
    pub fn pending_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_pending()).count()
    }
}
