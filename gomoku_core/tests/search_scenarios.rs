#[cfg(test)]
mod tests {
    use gomoku_core::engine::config::EngineConfig;
    use gomoku_core::engine::eval::WIN_SCORE;
    use gomoku_core::engine::search::MinimaxEngine;
    use gomoku_core::engine::{build_searcher, Move, Searcher, Strategy};
    use gomoku_core::logic::board::{Board, Player};
    use gomoku_core::logic::game::{GameState, GameStatus};
    use std::sync::Arc;

    fn setup_diagonal_four() -> GameState {
        let mut game = GameState::new();
        // A builds (3,3)..(6,6), B answers far away on row 12.
        for i in 3..7 {
            game.make_move(i, i).unwrap();
            game.make_move(12, i).unwrap();
        }
        game
    }

    #[test]
    fn test_minimax_completes_diagonal_five() {
        let game = setup_diagonal_four();
        let config = Arc::new(EngineConfig::default());
        let mut engine = MinimaxEngine::new(config);

        let outcome = engine.search(&game.board, game.turn).unwrap();
        assert!(
            outcome.mv == Move::new(2, 2) || outcome.mv == Move::new(7, 7),
            "expected diagonal completion, got {}",
            outcome.mv
        );
        assert_eq!(outcome.score, WIN_SCORE);
    }

    #[test]
    fn test_both_strategies_finish_the_game() {
        for strategy in [Strategy::Minimax, Strategy::Mcts] {
            let mut game = setup_diagonal_four();
            let config = Arc::new(EngineConfig {
                mcts_iterations: 200,
                playout_margin: Some(2),
                seed: Some(17),
                ..EngineConfig::default()
            });
            let mut searcher = build_searcher(strategy, config);
            let mv = searcher.choose_move(&game.board, game.turn).unwrap();
            let status = game.make_move(mv.row(), mv.col()).unwrap();
            assert_eq!(status, GameStatus::Won(Player::A), "{strategy:?} missed the win");
        }
    }

    #[test]
    fn test_minimax_blocks_vertical_four() {
        let mut game = GameState::new();
        // B stacks (2,9)..(5,9); A's replies are scattered and the top end
        // is already capped by A.
        game.make_move(1, 9).unwrap();
        game.make_move(2, 9).unwrap();
        game.make_move(10, 1).unwrap();
        game.make_move(3, 9).unwrap();
        game.make_move(12, 4).unwrap();
        game.make_move(4, 9).unwrap();
        game.make_move(0, 14).unwrap();
        game.make_move(5, 9).unwrap();
        assert_eq!(game.turn, Player::A);

        let config = Arc::new(EngineConfig::default());
        let mut engine = MinimaxEngine::new(config);
        let mv = engine.choose_move(&game.board, game.turn).unwrap();
        assert_eq!(mv, Move::new(6, 9));
    }

    #[test]
    fn test_board_text_scenario() {
        // B has four on the anti-diagonal, capped by A at (8,6); the only
        // completion left is (3,11).
        let board = Board::from_text(
            "
                0  1  2  3  4  5  6  7  8  9 10 11 12 13 14
             0  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
             1  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
             2  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
             3  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
             4  .  .  .  .  .  .  .  .  .  .  O  .  .  .  .
             5  .  .  .  .  .  .  .  .  .  O  .  .  .  .  .
             6  .  .  .  .  .  .  .  .  O  .  .  .  .  .  .
             7  .  .  .  .  .  .  .  O  X  .  .  .  .  .  .
             8  .  .  .  .  .  .  X  X  .  .  .  .  .  .  .
             9  .  .  .  .  .  X  .  .  .  .  .  .  .  .  .
            10  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
            11  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
            12  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
            13  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
            14  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .",
        )
        .unwrap();
        assert_eq!(board.stone_count(), 8);

        let config = Arc::new(EngineConfig::default());
        let mut engine = MinimaxEngine::new(config);
        let mv = engine.choose_move(&board, Player::A).unwrap();
        assert_eq!(mv, Move::new(3, 11));
    }
}
