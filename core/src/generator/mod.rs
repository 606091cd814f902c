use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, config: &GameConfig) -> Deck;
}

/// Deals the cards exactly in configuration order, each symbol twice in a row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrderedDeckGenerator;

impl DeckGenerator for OrderedDeckGenerator {
    fn generate(self, config: &GameConfig) -> Deck {
        let cards: Vec<Card> = config.unshuffled_symbols().map(Card::new).collect();
        // GameConfig::new already rejected empty and repeated symbols
        debug_assert_eq!(Deck::check_pairs(&cards), Ok(()));
        Deck { cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(deck: &Deck) -> Vec<&str> {
        deck.iter().map(Card::symbol).collect()
    }

    #[test]
    fn ordered_deal_follows_config_order() {
        let config = GameConfig::new(["sun", "moon"], 1000).unwrap();

        let deck = OrderedDeckGenerator.generate(&config);

        assert_eq!(symbols(&deck), ["sun", "sun", "moon", "moon"]);
    }

    #[test]
    fn dealt_deck_is_accepted_by_from_symbols() {
        let config = GameConfig::new(["a", "b", "c"], 1000).unwrap();

        let dealt = OrderedDeckGenerator.generate(&config);

        assert_eq!(Deck::from_symbols(symbols(&dealt)), Ok(dealt));
    }

    #[test]
    fn repeated_or_missing_symbols_never_reach_the_dealer() {
        assert_eq!(
            GameConfig::new(["a", "a"], 1000),
            Err(GameError::DuplicateSymbol("a".into()))
        );
        assert_eq!(
            GameConfig::new(Vec::<&str>::new(), 1000),
            Err(GameError::NoSymbols)
        );
    }
}
