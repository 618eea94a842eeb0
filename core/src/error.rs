use thiserror::Error;

use crate::PairCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("At least one pair is required")]
    NoPairs,
    #[error("Requested {requested} pairs but the symbol catalog only has {available}")]
    TooManyPairs {
        requested: PairCount,
        available: PairCount,
    },
    #[error("Every symbol in a deck must appear exactly twice")]
    InvalidDeck,
}

pub type Result<T> = core::result::Result<T, GameError>;
