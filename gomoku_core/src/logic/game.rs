use crate::engine::Move;
use crate::logic::board::{Board, Player};
use crate::logic::rules::{check_win, is_valid_move, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub player: Player,
    /// Strategy and score of the searcher that chose the move, set by `apply`.
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Player,
    pub status: GameStatus,
    pub last_move: Option<Move>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::A,
            status: GameStatus::Playing,
            last_move: None,
            history: Vec::new(),
        }
    }

    /// Plays a stone for the side to move and returns the resulting status.
    pub fn make_move(&mut self, row: usize, col: usize) -> Result<GameStatus, MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }
        is_valid_move(&self.board, row, col)?;

        let mv = Move::from_coord(row, col);
        let player = self.turn;
        self.board.put(row, col, player);
        self.history.push(MoveRecord {
            mv,
            player,
            note: None,
        });
        self.last_move = Some(mv);
        self.turn = player.opponent();

        self.update_status(mv, player);
        Ok(self.status)
    }

    /// `make_move` for a searcher's answer, with a note kept in the history.
    pub fn apply(&mut self, mv: Move, note: Option<String>) -> Result<GameStatus, MoveError> {
        let status = self.make_move(mv.row(), mv.col())?;
        if let Some(record) = self.history.last_mut() {
            record.note = note;
        }
        Ok(status)
    }

    fn update_status(&mut self, mv: Move, player: Player) {
        if check_win(&self.board, mv.row(), mv.col(), player) {
            self.status = GameStatus::Won(player);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        }
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn undo_move(&mut self) -> bool {
        if let Some(record) = self.history.pop() {
            self.board.remove(record.mv.row(), record.mv.col());
            self.turn = record.player;
            self.last_move = self.history.last().map(|prev| prev.mv);

            // Undoing the deciding move reopens the game.
            self.status = GameStatus::Playing;

            true
        } else {
            false
        }
    }
}
