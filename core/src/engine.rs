use chrono::{DateTime, Utc};

use crate::*;

/// Revert of a mismatched pair, to be applied once its delay has elapsed.
///
/// The value identifies the exact selection it belongs to: a revert carried over from a previous
/// deal does not match the game's outstanding revert and is ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingRevert {
    deal_id: DealId,
    first: CardIndex,
    second: CardIndex,
    delay_ms: Millis,
}

impl PendingRevert {
    pub fn cards(&self) -> (CardIndex, CardIndex) {
        (self.first, self.second)
    }

    pub fn delay_ms(&self) -> Millis {
        self.delay_ms
    }
}

/// Turn-resolution state of a single deal.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    deck: Deck,
    move_count: MoveCount,
    pending_index: Option<CardIndex>,
    input_locked: bool,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    scheduled_revert: Option<PendingRevert>,
    deal_id: DealId,
    revert_delay_ms: Millis,
}

impl GameState {
    pub fn new(deck: Deck, revert_delay_ms: Millis, now: DateTime<Utc>) -> Self {
        Self {
            deck,
            move_count: 0,
            pending_index: None,
            input_locked: false,
            started_at: now,
            ended_at: None,
            scheduled_revert: None,
            deal_id: 0,
            revert_delay_ms,
        }
    }

    /// Deals a shuffled deck for `config`.
    pub fn deal(config: &GameConfig, seed: u64, now: DateTime<Utc>) -> Self {
        let deck = ShuffledDeckGenerator::new(seed).generate(config);
        Self::new(deck, config.revert_delay_ms(), now)
    }

    /// Starts over with `deck`, dropping every trace of the previous deal.
    pub fn initialize(&mut self, deck: Deck, now: DateTime<Utc>) {
        self.deck = deck;
        self.move_count = 0;
        self.pending_index = None;
        self.input_locked = false;
        self.started_at = now;
        self.ended_at = None;
        self.scheduled_revert = None;
        self.deal_id = self.deal_id.wrapping_add(1);
        log::debug!("deal {} started at {}ms", self.deal_id, now.timestamp_millis());
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn move_count(&self) -> MoveCount {
        self.move_count
    }

    pub fn pending_index(&self) -> Option<CardIndex> {
        self.pending_index
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn deal_id(&self) -> DealId {
        self.deal_id
    }

    pub fn revert_delay_ms(&self) -> Millis {
        self.revert_delay_ms
    }

    pub fn scheduled_revert(&self) -> Option<PendingRevert> {
        self.scheduled_revert
    }

    pub fn check_win(&self) -> bool {
        self.deck.all_matched()
    }

    /// Whether a click on `index` would be accepted right now.
    pub fn can_reveal(&self, index: CardIndex) -> bool {
        !self.input_locked && self.deck.get(index).is_some_and(Card::is_selectable)
    }

    /// Seconds since the deal, frozen once the game is won
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        let millis = (self.ended_at.unwrap_or(now) - self.started_at)
            .num_milliseconds()
            .max(0);
        millis as f64 / 1000.0
    }

    pub fn reveal(&mut self, index: CardIndex, now: DateTime<Utc>) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let index = self.deck.validate_index(index)?;

        if self.input_locked || !self.deck.card(index).is_selectable() {
            log::trace!("ignored reveal of card {}", index);
            return Ok(NoChange);
        }

        self.deck.card_mut(index).turn_up();

        let Some(first) = self.pending_index else {
            log::trace!("first pick: card {}", index);
            self.pending_index = Some(index);
            return Ok(FirstPick);
        };

        self.move_count = self.move_count.saturating_add(1);

        if self.deck.card(first).symbol() == self.deck.card(index).symbol() {
            self.deck.card_mut(first).mark_matched();
            self.deck.card_mut(index).mark_matched();
            self.pending_index = None;
            log::debug!("matched cards {} and {}", first, index);

            if self.check_win() {
                self.ended_at = Some(now);
                self.input_locked = true;
                let result = GameResult {
                    moves: self.move_count,
                    elapsed_secs: self.elapsed_secs(now),
                };
                log::debug!("won deal {}: {:?}", self.deal_id, result);
                Ok(Won(result))
            } else {
                Ok(Matched)
            }
        } else {
            self.input_locked = true;
            let revert = PendingRevert {
                deal_id: self.deal_id,
                first,
                second: index,
                delay_ms: self.revert_delay_ms,
            };
            self.scheduled_revert = Some(revert);
            log::debug!("mismatched cards {} and {}", first, index);
            Ok(Mismatched(revert))
        }
    }

    /// Hides a mismatched pair again and releases the input lock.
    pub fn complete_revert(&mut self, revert: PendingRevert) -> RevertOutcome {
        if self.scheduled_revert != Some(revert) {
            log::warn!(
                "ignoring revert for deal {}, current deal is {}",
                revert.deal_id,
                self.deal_id
            );
            return RevertOutcome::Stale;
        }

        self.deck.card_mut(revert.first).turn_down();
        self.deck.card_mut(revert.second).turn_down();
        self.pending_index = None;
        self.input_locked = false;
        self.scheduled_revert = None;
        log::trace!("reverted cards {} and {}", revert.first, revert.second);
        RevertOutcome::Applied
    }
}
