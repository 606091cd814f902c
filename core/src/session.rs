use chrono::{DateTime, Utc};

use crate::*;

/// What a single click did, as far as the page is concerned.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionEvent {
    pub outcome: RevealOutcome,
    pub score_update: ScoreUpdate,
}

impl SessionEvent {
    pub const fn has_update(&self) -> bool {
        self.outcome.has_update() || self.score_update.has_update()
    }
}

/// Owns the running game and the best score, and is the only thing that mutates either.
#[derive(Clone, Debug)]
pub struct Session<S> {
    config: GameConfig,
    game: GameState,
    scores: ScoreStore<S>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(config: GameConfig, storage: S, seed: u64, now: DateTime<Utc>) -> Self {
        let game = GameState::deal(&config, seed, now);
        Self {
            config,
            game,
            scores: ScoreStore::new(storage),
        }
    }

    /// Throws away the current game and deals a new one.
    pub fn initialize(&mut self, seed: u64, now: DateTime<Utc>) {
        let deck = ShuffledDeckGenerator::new(seed).generate(&self.config);
        self.game.initialize(deck, now);
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn best_score(&self) -> BestScore {
        self.scores.get()
    }

    pub fn reveal(&mut self, index: CardIndex, now: DateTime<Utc>) -> Result<SessionEvent> {
        let outcome = self.game.reveal(index, now)?;

        let score_update = match &outcome {
            RevealOutcome::Won(result) => {
                match self.scores.compare_and_update(result.moves, result.elapsed_secs) {
                    Ok(update) => update,
                    Err(err) => {
                        log::error!("Could not save best score: {}", err);
                        ScoreUpdate::Unchanged
                    }
                }
            }
            _ => ScoreUpdate::Unchanged,
        };

        Ok(SessionEvent {
            outcome,
            score_update,
        })
    }

    pub fn complete_revert(&mut self, revert: PendingRevert) -> RevertOutcome {
        self.game.complete_revert(revert)
    }
}
