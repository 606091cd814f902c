use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use mnemo_core as game;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Reveal(game::CardIndex),
    RevertDue(game::PendingRevert),
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    symbol: AttrValue,
    face: game::CardFace,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        symbol,
        face,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!("card");
    // the symbol only reaches the DOM once the card is face up
    if face.is_shown() {
        class.push("flipped");
        class.push(symbol.to_string());
    }
    if face == game::CardFace::Matched {
        class.push("matched");
    }
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <div {class} {onclick}/>
    }
}

/// Class for the reset button, so the page can style a finished game.
fn game_state_class(game: &game::GameState) -> &'static str {
    if game.check_win() {
        "won"
    } else if game.is_input_locked() {
        "waiting"
    } else {
        "playing"
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// How long a mismatched pair stays visible
    #[arg(long)]
    pub(crate) revert_delay_ms: Option<game::Millis>,
}

impl GameProps {
    fn config(&self) -> game::GameConfig {
        let config = game::GameConfig::default();
        match self.revert_delay_ms {
            Some(delay) => config.with_revert_delay(delay),
            None => config,
        }
    }
}

pub(crate) struct GameView {
    session: game::Session<LocalStorageStore>,
    best_score: game::BestScore,
}

impl GameView {
    fn reveal_card(&mut self, ctx: &Context<Self>, index: game::CardIndex) -> bool {
        let event = match self.session.reveal(index, utc_now()) {
            Ok(event) => event,
            Err(err) => {
                log::error!("Could not reveal card {}: {}", index, err);
                return false;
            }
        };

        match &event.outcome {
            game::RevealOutcome::Mismatched(revert) => Self::schedule_revert(ctx, *revert),
            game::RevealOutcome::Won(result) => {
                log::info!("{}", result);
                gloo::dialogs::alert(&result.to_string());
            }
            _ => {}
        }

        if let game::ScoreUpdate::NewBest(best_score) = event.score_update {
            self.best_score = best_score;
        }

        event.has_update()
    }

    /// Fires once no matter what happens in between; the session drops it if the deal changed.
    fn schedule_revert(ctx: &Context<Self>, revert: game::PendingRevert) {
        let link = ctx.link().clone();
        Timeout::new(revert.delay_ms(), move || {
            link.send_message(Msg::RevertDue(revert))
        })
        .forget();
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        let session = game::Session::new(props.config(), LocalStorageStore, seed, utc_now());
        let best_score = session.best_score();
        Self {
            session,
            best_score,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Reveal(index) => {
                log::debug!("reveal card: {}", index);
                self.reveal_card(ctx, index)
            }
            RevertDue(revert) => self.session.complete_revert(revert).has_update(),
            NewGame => {
                self.session.initialize(js_random_seed(), utc_now());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let game = self.session.game();
        let move_count = game.move_count().to_string();
        let best_score = self.best_score.to_string();
        let game_state_class = game_state_class(game);

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });
        let cb_reveal = ctx.link().callback(Msg::Reveal);

        html! {
            <div class="mnemo">
                <nav>
                    <aside>{"Moves: "}<span id="moveCount">{move_count}</span></aside>
                    <span><button class={game_state_class} onclick={cb_new_game}>{"Reset"}</button></span>
                    <aside id="highScore">{best_score}</aside>
                </nav>
                <section id="game-container">
                    {
                        for game.deck().iter().enumerate().map(|(index, card)| {
                            let symbol = AttrValue::from(card.symbol().to_string());
                            let face = card.face();
                            let locked = !game.can_reveal(index);
                            let callback = cb_reveal.clone();
                            html! {
                                <CardView {index} {symbol} {face} {locked} {callback}/>
                            }
                        })
                    }
                </section>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::prelude::*;
    use mnemo_core::StorageKey;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(0).unwrap()
    }

    #[test]
    fn state_class_follows_the_game() {
        let deck = game::Deck::from_symbols(["red", "blue", "red", "blue"]).unwrap();
        let mut state = game::GameState::new(deck, 1000, t0());
        assert_eq!(game_state_class(&state), "playing");

        state.reveal(0, t0()).unwrap();
        let game::RevealOutcome::Mismatched(revert) = state.reveal(1, t0()).unwrap() else {
            panic!("expected a mismatch");
        };
        assert_eq!(game_state_class(&state), "waiting");

        state.complete_revert(revert);
        for index in [0, 2, 1, 3] {
            state.reveal(index, t0()).unwrap();
        }
        assert_eq!(game_state_class(&state), "won");
    }

    #[test]
    fn delay_override_reaches_the_config() {
        let props = GameProps {
            seed: None,
            revert_delay_ms: Some(400),
        };

        assert_eq!(props.config().revert_delay_ms(), 400);
        assert_eq!(props.config().pair_count(), 5);
    }

    #[test]
    fn best_score_key_is_namespaced() {
        assert_eq!(<game::BestScore as StorageKey>::KEY, "mnemo:best-score");
    }
}
