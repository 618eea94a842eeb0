/// Identity of a card within the current deck, `0..2 * pairs`.
pub type CardId = u8;

/// Count type used for pair counts, match counts and move counts.
pub type PairCount = u8;

/// Generation counter distinguishing one round from the next.
pub type RoundId = u32;

/// Milliseconds, used for every engine delay.
pub type Millis = u32;

/// Moves can exceed the pair count by a lot, so they get a wider type.
pub type MoveCount = u32;

pub trait ToIndex {
    fn to_index(self) -> usize;
}

impl ToIndex for CardId {
    fn to_index(self) -> usize {
        self.into()
    }
}

pub const fn card_count(pairs: PairCount) -> usize {
    (pairs as usize) * 2
}
