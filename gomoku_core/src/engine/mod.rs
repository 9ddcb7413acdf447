use crate::engine::config::EngineConfig;
use crate::logic::board::{Board, Player, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub mod config;
pub mod eval;
pub mod mcts;
pub mod move_list;
pub mod movegen;
pub mod search;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Builds a move from in-bounds board coordinates.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_coord(row: usize, col: usize) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    pub const fn row(self) -> usize {
        self.row as usize
    }

    pub const fn col(self) -> usize {
        self.col as usize
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no legal move available")]
    NoLegalMove,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub iterations: u32,
    pub time_ms: u64,
}

/// What a searcher hands back to the game loop.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub mv: Move,
    /// Minimax score from the searching player's perspective; MCTS reports
    /// the chosen child's mean result scaled to `[-1000, 1000]`.
    pub score: i64,
    pub stats: SearchStats,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board, player: Player) -> i64;
}

pub trait Searcher {
    /// Searches `board` for `player`. The caller's board is never modified.
    fn search(&mut self, board: &Board, player: Player) -> Result<SearchOutcome, SearchError>;

    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Move, SearchError> {
        self.search(board, player).map(|outcome| outcome.mv)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Minimax,
    Mcts,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" | "alphabeta" => Ok(Self::Minimax),
            "mcts" => Ok(Self::Mcts),
            other => Err(format!("unknown strategy '{other}' (expected minimax or mcts)")),
        }
    }
}

pub fn build_searcher(strategy: Strategy, config: Arc<EngineConfig>) -> Box<dyn Searcher> {
    match strategy {
        Strategy::Minimax => Box::new(search::MinimaxEngine::new(config)),
        Strategy::Mcts => Box::new(mcts::MctsEngine::new(config)),
    }
}
