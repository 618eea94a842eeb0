use rand::prelude::*;

use super::*;

/// Plain shuffle of the catalog pairs, reproducible from the seed it was created with.
#[derive(Clone, Debug)]
pub struct RandomDeckGenerator {
    rng: SmallRng,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(&mut self, pairs: PairCount) -> Result<Deck> {
        let mut symbols = catalog_pairs(pairs)?;
        symbols.shuffle(&mut self.rng);
        log::trace!("dealt {} pairs: {:?}", pairs, symbols);
        Deck::from_symbols(&symbols)
    }
}
