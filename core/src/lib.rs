#![no_std]

extern crate alloc;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use score::*;
pub use session::*;
pub use storage::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod score;
mod session;
mod storage;
mod types;

/// Pair symbols and timing of a game.
///
/// Only [`GameConfig::new`] and [`Default`] build one, so the symbols are always non-empty and
/// distinct.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    symbols: Vec<String>,
    revert_delay_ms: Millis,
}

impl GameConfig {
    pub const DEFAULT_REVERT_DELAY_MS: Millis = 1000;
    pub const DEFAULT_SYMBOLS: [&'static str; 5] = ["red", "blue", "green", "pink", "white"];

    pub fn new<I, S>(symbols: I, revert_delay_ms: Millis) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(GameError::NoSymbols);
        }

        let mut seen = BTreeSet::new();
        for symbol in &symbols {
            if symbol.is_empty() {
                return Err(GameError::EmptySymbol);
            }
            if !seen.insert(symbol.as_str()) {
                return Err(GameError::DuplicateSymbol(symbol.clone()));
            }
        }

        Ok(Self {
            symbols,
            revert_delay_ms,
        })
    }

    pub fn with_revert_delay(self, revert_delay_ms: Millis) -> Self {
        Self {
            revert_delay_ms,
            ..self
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn revert_delay_ms(&self) -> Millis {
        self.revert_delay_ms
    }

    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn card_count(&self) -> usize {
        self.pair_count() * 2
    }

    /// Every symbol twice, in configuration order.
    pub fn unshuffled_symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols
            .iter()
            .flat_map(|symbol| [symbol.as_str(), symbol.as_str()])
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: Self::DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            revert_delay_ms: Self::DEFAULT_REVERT_DELAY_MS,
        }
    }
}

/// An ordered deck where every symbol appears exactly twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds a deck in the given order, rejecting anything that isn't made of pairs.
    pub fn from_symbols<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cards: Vec<Card> = symbols.into_iter().map(Card::new).collect();
        Self::check_pairs(&cards)?;
        Ok(Self { cards })
    }

    pub(crate) fn check_pairs(cards: &[Card]) -> Result<()> {
        if cards.is_empty() {
            return Err(GameError::NoSymbols);
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for card in cards {
            if card.symbol().is_empty() {
                return Err(GameError::EmptySymbol);
            }
            *counts.entry(card.symbol()).or_default() += 1;
        }
        match counts.iter().find(|&(_, &count)| count != 2) {
            Some((symbol, _)) => Err(GameError::UnpairedSymbol(symbol.to_string())),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn get(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if index < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(Card::is_matched)
    }

    /// Panics on an index that hasn't gone through [`Deck::validate_index`].
    pub(crate) fn card(&self, index: CardIndex) -> &Card {
        &self.cards[index]
    }

    pub(crate) fn card_mut(&mut self, index: CardIndex) -> &mut Card {
        &mut self.cards[index]
    }
}

/// Final stats of a completed game.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameResult {
    pub moves: MoveCount,
    pub elapsed_secs: f64,
}

/// The win announcement.
impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "YOU WIN! Moves: {} Time: {:.2} seconds",
            self.moves, self.elapsed_secs
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    FirstPick,
    Matched,
    Mismatched(PendingRevert),
    Won(GameResult),
}

impl RevealOutcome {
    /// Whether the board needs to be redrawn
    pub const fn has_update(&self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            FirstPick => true,
            Matched => true,
            Mismatched(_) => true,
            Won(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevertOutcome {
    Applied,
    Stale,
}

impl RevertOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Applied => true,
            Self::Stale => false,
        }
    }
}
