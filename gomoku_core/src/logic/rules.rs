use crate::logic::board::{Board, Cell, Player, BOARD_SIZE, WIN_SIZE};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
    #[error("the game is already over")]
    GameOver,
}

/// Line directions: horizontal, vertical, diagonal down-right, diagonal up-right.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Checks that (row, col) is on the board and empty.
pub fn is_valid_move(board: &Board, row: usize, col: usize) -> Result<(), MoveError> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(MoveError::OutOfBounds { row, col });
    }
    if !board.is_empty_at(row, col) {
        return Err(MoveError::Occupied { row, col });
    }
    Ok(())
}

/// Counts `player` stones starting at (row, col) inclusive and stepping by
/// (dr, dc). Stops at the first foreign cell or the edge, and never counts
/// past `WIN_SIZE`.
pub fn count_consecutive(
    board: &Board,
    row: isize,
    col: isize,
    player: Player,
    dr: isize,
    dc: isize,
) -> usize {
    let target = player.cell();
    let mut count = 0;
    let (mut r, mut c) = (row, col);
    while count < WIN_SIZE && board.cell_at(r, c) == Some(target) {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Does the stone `player` just placed at (row, col) complete a run of
/// `WIN_SIZE`? The cell must already hold `player`.
#[allow(clippy::cast_possible_wrap)]
pub fn check_win(board: &Board, row: usize, col: usize, player: Player) -> bool {
    debug_assert_eq!(board.get(row, col), player.cell());
    let (r, c) = (row as isize, col as isize);
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let forward = count_consecutive(board, r, c, player, dr, dc);
        let backward = count_consecutive(board, r, c, player, -dr, -dc);
        forward + backward - 1 >= WIN_SIZE
    })
}

/// Longest run of `player` stones a stone at the empty cell (row, col) would
/// join, over the four directions. The cell itself is not counted.
#[allow(clippy::cast_possible_wrap)]
pub fn connective_count(board: &Board, row: usize, col: usize, player: Player) -> usize {
    let (r, c) = (row as isize, col as isize);
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| {
            count_consecutive(board, r + dr, c + dc, player, dr, dc)
                + count_consecutive(board, r - dr, c - dc, player, -dr, -dc)
        })
        .max()
        .unwrap_or(0)
}

/// First player holding a winning run anywhere on the board.
pub fn find_winner(board: &Board) -> Option<Player> {
    (0..BOARD_SIZE)
        .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
        .find_map(|(r, c)| match board.get(r, c) {
            Cell::Empty => None,
            cell => cell
                .player()
                .filter(|&player| check_win(board, r, c, player)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: &[(usize, usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(r, c, p) in stones {
            board.put(r, c, p);
        }
        board
    }

    #[test]
    fn test_fifth_stone_wins_horizontally() {
        let mut board = board_with(&[
            (7, 3, Player::A),
            (7, 4, Player::A),
            (7, 5, Player::A),
            (7, 6, Player::A),
        ]);
        assert!(!check_win(&board, 7, 6, Player::A));

        board.put(7, 7, Player::A);
        assert!(check_win(&board, 7, 7, Player::A));
        // Any stone of the run detects it.
        assert!(check_win(&board, 7, 3, Player::A));
    }

    #[test]
    fn test_closed_five_still_wins() {
        let closed_four = board_with(&[
            (2, 0, Player::B),
            (3, 1, Player::B),
            (4, 2, Player::B),
            (5, 3, Player::B),
            (6, 4, Player::A),
        ]);
        assert!(!check_win(&closed_four, 5, 3, Player::B));

        // Board edge on one end, opponent stone on the other.
        let mut closed = board_with(&[
            (0, 0, Player::B),
            (1, 1, Player::B),
            (2, 2, Player::B),
            (3, 3, Player::B),
            (5, 5, Player::A),
        ]);
        closed.put(4, 4, Player::B);
        assert!(check_win(&closed, 4, 4, Player::B));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let board = board_with(&[
            (3, 9, Player::A),
            (4, 9, Player::A),
            (5, 9, Player::A),
            (6, 9, Player::A),
        ]);
        for r in 3..7 {
            assert!(!check_win(&board, r, 9, Player::A));
        }
    }

    #[test]
    fn test_run_split_by_opponent_does_not_count() {
        let mut board = board_with(&[
            (10, 2, Player::A),
            (9, 3, Player::A),
            (8, 4, Player::B),
            (7, 5, Player::A),
            (6, 6, Player::A),
        ]);
        board.put(5, 7, Player::A);
        assert!(!check_win(&board, 5, 7, Player::A));
        assert!(!check_win(&board, 9, 3, Player::A));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let mut board = board_with(&[
            (14, 0, Player::B),
            (13, 1, Player::B),
            (12, 2, Player::B),
            (10, 4, Player::B),
        ]);
        board.put(11, 3, Player::B);
        assert!(check_win(&board, 11, 3, Player::B));
        assert_eq!(find_winner(&board), Some(Player::B));
    }

    #[test]
    fn test_overline_wins() {
        let mut board = Board::new();
        for r in 0..6 {
            if r != 2 {
                board.put(r, 0, Player::A);
            }
        }
        board.put(2, 0, Player::A);
        assert!(check_win(&board, 2, 0, Player::A));
    }

    #[test]
    fn test_connective_count() {
        let board = board_with(&[
            (7, 5, Player::A),
            (7, 6, Player::A),
            (7, 8, Player::A),
            (6, 7, Player::B),
        ]);
        assert_eq!(connective_count(&board, 7, 7, Player::A), 3);
        assert_eq!(connective_count(&board, 7, 7, Player::B), 1);
        assert_eq!(connective_count(&board, 0, 0, Player::A), 0);
    }

    #[test]
    fn test_is_valid_move() {
        let board = board_with(&[(4, 4, Player::A)]);
        assert!(is_valid_move(&board, 0, 14).is_ok());
        assert_eq!(
            is_valid_move(&board, 4, 4),
            Err(MoveError::Occupied { row: 4, col: 4 })
        );
        assert_eq!(
            is_valid_move(&board, 3, 15),
            Err(MoveError::OutOfBounds { row: 3, col: 15 })
        );
        assert!(find_winner(&board).is_none());
    }
}
