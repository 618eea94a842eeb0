use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(&mut self, pairs: PairCount) -> Result<Deck>;
}

/// First `pairs` symbols of the catalog, each listed twice, in catalog order.
pub fn catalog_pairs(pairs: PairCount) -> Result<Vec<Symbol>> {
    let available = Symbol::CATALOG.len() as PairCount;
    if pairs == 0 {
        return Err(GameError::NoPairs);
    }
    if pairs > available {
        return Err(GameError::TooManyPairs {
            requested: pairs,
            available,
        });
    }

    let chosen = &Symbol::CATALOG[..usize::from(pairs)];
    Ok(chosen.iter().chain(chosen).copied().collect())
}
