use crate::engine::config::EngineConfig;
use crate::engine::eval::{LineEvaluator, WIN_SCORE};
use crate::engine::move_list::MoveList;
use crate::engine::movegen::EngineMoveGen;
use crate::engine::{Evaluator, Move, SearchError, SearchOutcome, SearchStats, Searcher};
use crate::logic::board::{Board, Player};
use crate::logic::rules::check_win;
use std::sync::Arc;
use std::time::Instant;

/// Depth-limited alpha-beta over the line evaluator and the ranked
/// candidate generator.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    evaluator: LineEvaluator,
    nodes_searched: u32,
}

impl MinimaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            config,
            evaluator: LineEvaluator,
            nodes_searched: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.config = config;
    }

    pub const fn nodes_searched(&self) -> u32 {
        self.nodes_searched
    }

    /// Searches `depth` plies for `player` and returns the root score with
    /// the best move. A root depth of 0 is searched as 1, since a move must
    /// come back.
    pub fn search_depth(
        &mut self,
        board: &Board,
        depth: u8,
        player: Player,
    ) -> Result<(i64, Move), SearchError> {
        self.nodes_searched = 0;
        let mut work = board.clone();
        let (score, best) =
            self.alpha_beta(&mut work, depth.max(1), i64::MIN, i64::MAX, true, player);
        debug_assert_eq!(&work, board);
        best.map(|mv| (score, mv)).ok_or(SearchError::NoLegalMove)
    }

    /// Candidates for the side to move, ordered by the static evaluation
    /// (from `player`'s side) after tentatively placing the stone: best
    /// first for the maximizer, worst first for the minimizer.
    fn order_moves(
        &self,
        board: &mut Board,
        mover: Player,
        player: Player,
        maximizing: bool,
    ) -> MoveList {
        let candidates = EngineMoveGen::new(&self.config).generate(board, mover);
        let mut ordered = MoveList::new();
        for mv in candidates.moves() {
            board.put(mv.row(), mv.col(), mover);
            let score = self.evaluator.evaluate(board, player);
            board.remove(mv.row(), mv.col());
            ordered.push(mv, score);
        }
        if maximizing {
            ordered.sort_descending();
        } else {
            ordered.sort_ascending();
        }
        ordered
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
        player: Player,
    ) -> (i64, Option<Move>) {
        self.nodes_searched += 1;

        if depth == 0 {
            return (self.evaluator.evaluate(board, player), None);
        }

        let mover = if maximizing { player } else { player.opponent() };
        let moves = self.order_moves(board, mover, player, maximizing);
        if moves.is_empty() {
            return (self.evaluator.evaluate(board, player), None);
        }

        let mut best_score = if maximizing { i64::MIN } else { i64::MAX };
        let mut best_move = None;

        for entry in &moves {
            let mv = entry.mv;
            board.put(mv.row(), mv.col(), mover);
            if check_win(board, mv.row(), mv.col(), mover) {
                board.remove(mv.row(), mv.col());
                let score = if maximizing { WIN_SCORE } else { -WIN_SCORE };
                return (score, Some(mv));
            }
            let (score, _) = self.alpha_beta(board, depth - 1, alpha, beta, !maximizing, player);
            board.remove(mv.row(), mv.col());

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }

            if alpha >= beta {
                break;
            }
        }

        (best_score, best_move)
    }
}

impl Searcher for MinimaxEngine {
    fn search(&mut self, board: &Board, player: Player) -> Result<SearchOutcome, SearchError> {
        let depth = self.config.minimax_depth.max(1);
        let start = Instant::now();
        let (score, mv) = self.search_depth(board, depth, player)?;

        #[allow(clippy::cast_possible_truncation)]
        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            iterations: 0,
            time_ms: start.elapsed().as_millis() as u64,
        };
        log::debug!(
            "minimax: player {player} plays {mv} (score {score}, depth {depth}, {} nodes, {} ms)",
            stats.nodes,
            stats.time_ms
        );
        Ok(SearchOutcome { mv, score, stats })
    }
}
