use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card index")]
    InvalidIndex,
    #[error("At least one pair symbol is required")]
    NoSymbols,
    #[error("Pair symbols must not be empty")]
    EmptySymbol,
    #[error("Pair symbol {0:?} is listed more than once")]
    DuplicateSymbol(String),
    #[error("Symbol {0:?} does not appear exactly twice in the deck")]
    UnpairedSymbol(String),
}

pub type Result<T, E = GameError> = core::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Could not encode {key:?}: {reason}")]
    Encode { key: String, reason: String },
    #[error("Could not write {key:?} to storage: {reason}")]
    WriteFailed { key: String, reason: String },
}
