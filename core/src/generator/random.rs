use super::*;
use rand::prelude::*;

/// Generation strategy that deals every configured pair and shuffles the result uniformly.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffledDeckGenerator {
    seed: u64,
}

impl ShuffledDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for ShuffledDeckGenerator {
    fn generate(self, config: &GameConfig) -> Deck {
        let mut deck = OrderedDeckGenerator.generate(config);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        fisher_yates(deck.cards.as_mut_slice(), &mut rng);
        log::debug!("Dealt {} cards from seed {}", deck.len(), self.seed);
        deck
    }
}

/// Walks from the last slot down to 1, swapping each with a uniformly chosen slot in `0..=i`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
