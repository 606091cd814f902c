use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use serde::Serialize;
use serde_json::Value;

use crate::*;

/// Best completed game, each field `None` until known.
///
/// A missing field counts as worse than any real value, so a score that lost one of its fields in
/// storage is beaten by the next finished game.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BestScore {
    pub moves: Option<MoveCount>,
    pub elapsed_secs: Option<f64>,
}

#[derive(Serialize)]
struct StoredScore {
    moves: MoveCount,
    time: f64,
}

impl BestScore {
    pub const UNSET: Self = Self {
        moves: None,
        elapsed_secs: None,
    };

    pub const fn new(moves: MoveCount, elapsed_secs: f64) -> Self {
        Self {
            moves: Some(moves),
            elapsed_secs: Some(elapsed_secs),
        }
    }

    pub const fn is_set(&self) -> bool {
        self.moves.is_some() && self.elapsed_secs.is_some()
    }

    /// Lexicographic on (moves, time); equal scores do not beat each other.
    pub fn is_beaten_by(&self, moves: MoveCount, elapsed_secs: f64) -> bool {
        let by_moves = match self.moves {
            None => Ordering::Less,
            Some(best) => moves.cmp(&best),
        };
        match by_moves {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.elapsed_secs.is_none_or(|best| elapsed_secs < best),
        }
    }

    /// Parses a stored score field by field; anything unreadable stays `None`.
    pub fn from_json(text: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(text) else {
            log::warn!("discarding unreadable best score: {:?}", text);
            return Self::UNSET;
        };
        let moves = value
            .get("moves")
            .and_then(Value::as_u64)
            .and_then(|moves| MoveCount::try_from(moves).ok());
        let elapsed_secs = value.get("time").and_then(Value::as_f64);
        Self {
            moves,
            elapsed_secs,
        }
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        let (Some(moves), Some(time)) = (self.moves, self.elapsed_secs) else {
            return Err(StorageError::Encode {
                key: Self::KEY.to_string(),
                reason: "score is not set".to_string(),
            });
        };
        serde_json::to_string(&StoredScore { moves, time }).map_err(|err| StorageError::Encode {
            key: Self::KEY.to_string(),
            reason: err.to_string(),
        })
    }
}

impl StorageKey for BestScore {
    const KEY: &'static str = "mnemo:best-score";
}

/// The best score line shown next to the board.
impl fmt::Display for BestScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.moves, self.elapsed_secs) {
            (Some(moves), Some(secs)) => {
                write!(f, "High Score: Moves - {}, Time - {:.2} seconds", moves, secs)
            }
            _ => f.write_str("No high score yet"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScoreUpdate {
    Unchanged,
    NewBest(BestScore),
}

impl ScoreUpdate {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Unchanged => false,
            Self::NewBest(_) => true,
        }
    }
}

/// Read-modify-write access to the persisted best score.
#[derive(Clone, Debug)]
pub struct ScoreStore<S> {
    storage: S,
}

impl<S: KeyValueStore> ScoreStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self) -> BestScore {
        self.storage
            .get(BestScore::KEY)
            .map_or(BestScore::UNSET, |text| BestScore::from_json(&text))
    }

    pub fn compare_and_update(
        &mut self,
        moves: MoveCount,
        elapsed_secs: f64,
    ) -> Result<ScoreUpdate, StorageError> {
        let best = self.get();
        if !best.is_beaten_by(moves, elapsed_secs) {
            log::trace!("{} moves in {:.2}s does not beat {:?}", moves, elapsed_secs, best);
            return Ok(ScoreUpdate::Unchanged);
        }

        let candidate = BestScore::new(moves, elapsed_secs);
        self.storage.set(BestScore::KEY, &candidate.to_json()?)?;
        log::debug!("new best score: {:?}", candidate);
        Ok(ScoreUpdate::NewBest(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    fn store() -> ScoreStore<MemoryStore> {
        ScoreStore::new(MemoryStore::new())
    }

    #[test]
    fn empty_storage_reads_unset() {
        assert_eq!(store().get(), BestScore::UNSET);
        assert!(!store().get().is_set());
    }

    #[test]
    fn first_finished_game_becomes_best() {
        let mut scores = store();

        let update = scores.compare_and_update(8, 31.5).unwrap();

        assert_eq!(update, ScoreUpdate::NewBest(BestScore::new(8, 31.5)));
        assert_eq!(scores.get(), BestScore::new(8, 31.5));
    }

    #[test]
    fn fewer_moves_then_faster_time_wins() {
        let mut scores = store();

        scores.compare_and_update(3, 10.0).unwrap();
        assert!(scores.compare_and_update(3, 9.5).unwrap().has_update());
        assert_eq!(scores.get(), BestScore::new(3, 9.5));

        assert_eq!(
            scores.compare_and_update(4, 1.0).unwrap(),
            ScoreUpdate::Unchanged
        );
        assert_eq!(scores.get(), BestScore::new(3, 9.5));

        assert!(scores.compare_and_update(2, 99.0).unwrap().has_update());
        assert_eq!(scores.get(), BestScore::new(2, 99.0));
    }

    #[test]
    fn exact_tie_keeps_first_record() {
        let mut scores = store();

        scores.compare_and_update(5, 12.25).unwrap();

        assert_eq!(
            scores.compare_and_update(5, 12.25).unwrap(),
            ScoreUpdate::Unchanged
        );
    }

    #[test]
    fn garbage_in_storage_reads_unset() {
        let scores = ScoreStore::new(MemoryStore::new().with_entry(BestScore::KEY, "{not json"));

        assert_eq!(scores.get(), BestScore::UNSET);
    }

    #[test]
    fn missing_field_degrades_on_its_own() {
        let scores = ScoreStore::new(MemoryStore::new().with_entry(BestScore::KEY, r#"{"moves":4}"#));

        assert_eq!(
            scores.get(),
            BestScore {
                moves: Some(4),
                elapsed_secs: None,
            }
        );
    }

    #[test]
    fn mistyped_field_degrades_on_its_own() {
        let scores = ScoreStore::new(
            MemoryStore::new().with_entry(BestScore::KEY, r#"{"moves":"four","time":7.5}"#),
        );

        assert_eq!(
            scores.get(),
            BestScore {
                moves: None,
                elapsed_secs: Some(7.5),
            }
        );
    }

    #[test]
    fn partial_score_is_beaten_by_equal_moves() {
        let mut scores =
            ScoreStore::new(MemoryStore::new().with_entry(BestScore::KEY, r#"{"moves":4}"#));

        assert!(scores.compare_and_update(4, 500.0).unwrap().has_update());
        assert_eq!(scores.get(), BestScore::new(4, 500.0));
    }

    #[test]
    fn stored_format_keeps_fractional_seconds() {
        let mut scores = store();
        scores.compare_and_update(6, 17.125).unwrap();

        let text = scores.storage().get(BestScore::KEY).unwrap();

        assert_eq!(text, r#"{"moves":6,"time":17.125}"#);
        assert_eq!(BestScore::from_json(&text), BestScore::new(6, 17.125));
    }

    #[test]
    fn display_line_matches_board_text() {
        assert_eq!(format!("{}", BestScore::UNSET), "No high score yet");
        assert_eq!(
            format!(
                "{}",
                BestScore {
                    moves: Some(3),
                    elapsed_secs: None
                }
            ),
            "No high score yet"
        );
        assert_eq!(
            format!("{}", BestScore::new(3, 9.5)),
            "High Score: Moves - 3, Time - 9.50 seconds"
        );
    }
}
