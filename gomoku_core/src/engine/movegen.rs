use crate::engine::config::EngineConfig;
use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{Board, BoundingBox, Player, CENTER};
use crate::logic::rules::connective_count;

/// Empty cells inside the stones' bounding box grown by `margin`; every cell
/// when the board is empty.
pub fn candidate_cells(board: &Board, margin: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
    let area = board
        .bounding_box()
        .map_or_else(BoundingBox::full, |b| b.expand(margin));
    board.empty_cells_in(area)
}

/// Negative Manhattan distance to the centre cell.
#[allow(clippy::cast_possible_wrap)]
pub const fn center_term(row: usize, col: usize) -> i64 {
    -((row.abs_diff(CENTER) + col.abs_diff(CENTER)) as i64)
}

pub struct EngineMoveGen<'a> {
    config: &'a EngineConfig,
}

impl<'a> EngineMoveGen<'a> {
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Ranks a single empty cell for `player`: centrality, the run it would
    /// extend, and the opponent run it would block.
    pub fn heuristic_score(&self, board: &Board, row: usize, col: usize, player: Player) -> i64 {
        let shaping = self.config.bonus_shaping;
        let offense = shaping.apply(connective_count(board, row, col, player));
        let defense = shaping.apply(connective_count(board, row, col, player.opponent()));

        self.config.weight_center * center_term(row, col)
            + self.config.weight_offense * offense
            + self.config.weight_defense * defense
    }

    /// Best-first candidates for `player`, at most `top_n` of them.
    pub fn candidates(&self, board: &Board, player: Player, margin: usize, top_n: usize) -> MoveList {
        let mut moves = MoveList::new();
        for (r, c) in candidate_cells(board, margin) {
            moves.push(Move::from_coord(r, c), self.heuristic_score(board, r, c, player));
        }
        moves.sort_descending();
        moves.truncate(top_n);
        moves
    }

    /// `candidates` with the configured margin and width.
    pub fn generate(&self, board: &Board, player: Player) -> MoveList {
        self.candidates(board, player, self.config.margin, self.config.top_n)
    }
}
