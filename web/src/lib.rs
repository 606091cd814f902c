use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

impl Args {
    /// Parses `#-v&--seed=42` style fragments, ignoring empty segments.
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        let args = std::iter::once("mnemo")
            .chain(hash.split(['#', '&']).filter(|arg| !arg.is_empty()));
        Self::try_parse_from(args)
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::from_location_hash(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_location_hash("").unwrap();

        assert_eq!(args.game.seed, None);
        assert_eq!(args.game.revert_delay_ms, None);
    }

    #[test]
    fn hash_arguments_reach_the_game() {
        let args = Args::from_location_hash("#-vv&--seed=42&--revert-delay-ms=250").unwrap();

        assert_eq!(args.game.seed, Some(42));
        assert_eq!(args.game.revert_delay_ms, Some(250));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn bare_hash_is_not_an_argument() {
        assert!(Args::from_location_hash("#").is_ok());
    }
}
