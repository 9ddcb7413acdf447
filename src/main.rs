use gomoku_core::engine::config::EngineConfig;
use gomoku_core::engine::{build_searcher, Strategy};
use gomoku_core::logic::board::Player;
use gomoku_core::logic::game::{GameState, GameStatus};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: gomoku [config.json] [--a minimax|mcts] [--b minimax|mcts]";

#[derive(Debug, PartialEq, Eq)]
struct Options {
    config_path: Option<String>,
    a: Strategy,
    b: Strategy,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        config_path: None,
        a: Strategy::Minimax,
        b: Strategy::Mcts,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--a" => options.a = args.next().ok_or(USAGE)?.parse()?,
            "--b" => options.b = args.next().ok_or(USAGE)?.parse()?,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => {
                if options.config_path.is_some() {
                    return Err(format!("unexpected argument '{other}'\n{USAGE}"));
                }
                options.config_path = Some(other.to_string());
            }
        }
    }
    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // initialize tracing; also picks up the engine's `log` records
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = parse_args(std::env::args().skip(1))?;
    let config = match &options.config_path {
        Some(path) => EngineConfig::load_from_json(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    let config = Arc::new(config);
    tracing::info!(a = ?options.a, b = ?options.b, "starting match");

    let mut game = GameState::new();
    let mut player_a = build_searcher(options.a, Arc::clone(&config));
    let mut player_b = build_searcher(options.b, Arc::clone(&config));

    while !game.is_over() {
        let (searcher, strategy) = match game.turn {
            Player::A => (&mut player_a, options.a),
            Player::B => (&mut player_b, options.b),
        };
        let outcome = searcher.search(&game.board, game.turn)?;
        tracing::info!(
            turn = game.history.len() + 1,
            player = %game.turn,
            mv = %outcome.mv,
            score = outcome.score,
            time_ms = outcome.stats.time_ms,
            "{strategy:?} move"
        );
        let note = format!("{strategy:?} score {}", outcome.score);
        game.apply(outcome.mv, Some(note))?;
    }

    println!("{}", game.board);
    match game.status {
        GameStatus::Won(winner) => {
            println!("Player {winner} wins after {} moves", game.history.len());
        }
        GameStatus::Draw => println!("Draw: the board is full"),
        GameStatus::Playing => {}
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_args(args(&[])).unwrap();
        assert_eq!(options.config_path, None);
        assert_eq!(options.a, Strategy::Minimax);
        assert_eq!(options.b, Strategy::Mcts);
    }

    #[test]
    fn test_parse_config_and_strategies() {
        let options = parse_args(args(&["engine.json", "--a", "mcts", "--b", "minimax"])).unwrap();
        assert_eq!(options.config_path.as_deref(), Some("engine.json"));
        assert_eq!(options.a, Strategy::Mcts);
        assert_eq!(options.b, Strategy::Minimax);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&["--a"])).is_err());
        assert!(parse_args(args(&["--b", "random"])).is_err());
        assert!(parse_args(args(&["one.json", "two.json"])).is_err());
    }
}
