use alloc::string::String;

/// A single card of the deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    symbol: String,
    face_up: bool,
    matched: bool,
}

impl Card {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            face_up: false,
            matched: false,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Revealed by the selection currently being resolved.
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Whether clicking this card could do anything at all.
    pub fn is_selectable(&self) -> bool {
        !self.face_up && !self.matched
    }

    pub fn face(&self) -> CardFace {
        match (self.matched, self.face_up) {
            (true, _) => CardFace::Matched,
            (false, true) => CardFace::Revealed,
            (false, false) => CardFace::Hidden,
        }
    }

    pub(crate) fn turn_up(&mut self) {
        self.face_up = true;
    }

    pub(crate) fn turn_down(&mut self) {
        self.face_up = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }
}

/// What a renderer should show for a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CardFace {
    Hidden,
    Revealed,
    Matched,
}

impl CardFace {
    /// Whether the symbol is visible
    pub const fn is_shown(self) -> bool {
        match self {
            Self::Hidden => false,
            Self::Revealed => true,
            Self::Matched => true,
        }
    }
}
