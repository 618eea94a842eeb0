use serde::{Deserialize, Serialize};

use crate::CardId;

/// Token printed on the face of a card, two cards in a deck share each one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Heart,
    Star,
    Sparkles,
    Zap,
    Crown,
    Gem,
    Diamond,
    Circle,
    Square,
    Triangle,
}

impl Symbol {
    /// Decks always use a prefix of this list, so it must cover the hardest difficulty.
    pub const CATALOG: [Symbol; 10] = [
        Symbol::Heart,
        Symbol::Star,
        Symbol::Sparkles,
        Symbol::Zap,
        Symbol::Crown,
        Symbol::Gem,
        Symbol::Diamond,
        Symbol::Circle,
        Symbol::Square,
        Symbol::Triangle,
    ];

    pub const fn name(self) -> &'static str {
        use Symbol::*;
        match self {
            Heart => "heart",
            Star => "star",
            Sparkles => "sparkles",
            Zap => "zap",
            Crown => "crown",
            Gem => "gem",
            Diamond => "diamond",
            Circle => "circle",
            Square => "square",
            Triangle => "triangle",
        }
    }
}

/// Canonical card state stored by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: Symbol,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    pub const fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            is_flipped: false,
            is_matched: false,
        }
    }

    pub const fn is_face_up(self) -> bool {
        self.is_flipped || self.is_matched
    }

    /// Face up but still waiting for its pair to be resolved.
    pub const fn is_pending(self) -> bool {
        self.is_flipped && !self.is_matched
    }
}
