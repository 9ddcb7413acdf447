pub mod engine;
pub mod logic;

pub use engine::config::EngineConfig;
pub use engine::{build_searcher, Move, SearchError, SearchOutcome, Searcher, Strategy};
pub use logic::board::{Board, Player};
pub use logic::game::{GameState, GameStatus};
