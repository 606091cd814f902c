/// Position of a card within a dealt deck.
pub type CardIndex = usize;

/// Count type for completed pair attempts.
pub type MoveCount = u32;

/// Generation stamp of a deal, bumped every time the game is initialized.
pub type DealId = u32;

/// Milliseconds, used for the mismatch revert delay.
pub type Millis = u32;
