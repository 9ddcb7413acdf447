use crate::engine::Move;
use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use thiserror::Error;

pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
pub const WIN_SIZE: usize = 5;
pub const CENTER: usize = BOARD_SIZE / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::PlayerA => 'X',
            Self::PlayerB => 'O',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            'X' | 'x' => Some(Self::PlayerA),
            'O' | 'o' => Some(Self::PlayerB),
            _ => None,
        }
    }

    pub const fn player(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::PlayerA => Some(Player::A),
            Self::PlayerB => Some(Player::B),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub const fn cell(self) -> Cell {
        match self {
            Self::A => Cell::PlayerA,
            Self::B => Cell::PlayerB,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cell().symbol())
    }
}

/// Raised when a board is built from external data that is not a 15x15 grid
/// of known symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("degenerate board: expected 15x15, got {rows} rows (offending row width {cols})")]
    Degenerate { rows: usize, cols: usize },
    #[error("invalid cell symbol {0:?}")]
    InvalidSymbol(char),
}

/// Inclusive rectangle covering all stones on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl BoundingBox {
    /// Grows the box by `margin` on every side, clipped to the board.
    #[must_use]
    pub fn expand(self, margin: usize) -> Self {
        Self {
            min_row: self.min_row.saturating_sub(margin),
            max_row: (self.max_row + margin).min(BOARD_SIZE - 1),
            min_col: self.min_col.saturating_sub(margin),
            max_col: (self.max_col + margin).min(BOARD_SIZE - 1),
        }
    }

    pub const fn full() -> Self {
        Self {
            min_row: 0,
            max_row: BOARD_SIZE - 1,
            min_col: 0,
            max_col: BOARD_SIZE - 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Cell; TOTAL_CELLS],
    stones: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grid: [Cell::Empty; TOTAL_CELLS],
            stones: 0,
        }
    }

    #[must_use]
    pub const fn square_index(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    #[must_use]
    pub const fn index_to_coord(sq: usize) -> (usize, usize) {
        (sq / BOARD_SIZE, sq % BOARD_SIZE)
    }

    #[allow(clippy::cast_possible_wrap)]
    pub const fn in_bounds(row: isize, col: isize) -> bool {
        row >= 0 && row < BOARD_SIZE as isize && col >= 0 && col < BOARD_SIZE as isize
    }

    /// Cell at an in-bounds coordinate.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        self.grid[Self::square_index(row, col)]
    }

    /// Bounds-checked lookup for signed coordinates produced by direction walks.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if Self::in_bounds(row, col) {
            Some(self.get(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Cell::Empty
    }

    /// Validated placement used by every move-application entry point.
    pub fn place(&mut self, mv: Move, player: Player) -> Result<(), MoveError> {
        crate::logic::rules::is_valid_move(self, mv.row(), mv.col())?;
        self.put(mv.row(), mv.col(), player);
        Ok(())
    }

    /// Places a stone on a cell the caller knows to be empty.
    pub fn put(&mut self, row: usize, col: usize, player: Player) {
        debug_assert!(self.is_empty_at(row, col), "put on occupied cell ({row}, {col})");
        self.grid[Self::square_index(row, col)] = player.cell();
        self.stones += 1;
    }

    /// Retracts a stone previously placed with `put`.
    pub fn remove(&mut self, row: usize, col: usize) {
        debug_assert!(!self.is_empty_at(row, col), "remove on empty cell ({row}, {col})");
        self.grid[Self::square_index(row, col)] = Cell::Empty;
        self.stones -= 1;
    }

    pub const fn stone_count(&self) -> usize {
        self.stones
    }

    pub const fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    pub const fn is_full(&self) -> bool {
        self.stones == TOTAL_CELLS
    }

    /// Row-major iterator over the coordinates of every empty cell.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == Cell::Empty)
            .map(|(sq, _)| Self::index_to_coord(sq))
    }

    /// Empty cells inside `area`, row-major.
    pub fn empty_cells_in(&self, area: BoundingBox) -> impl Iterator<Item = (usize, usize)> + '_ {
        (area.min_row..=area.max_row).flat_map(move |r| {
            (area.min_col..=area.max_col)
                .filter(move |&c| self.is_empty_at(r, c))
                .map(move |c| (r, c))
        })
    }

    /// Minimal rectangle covering all stones, `None` on an empty board.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut area: Option<BoundingBox> = None;
        for (sq, _) in self
            .grid
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell != Cell::Empty)
        {
            let (r, c) = Self::index_to_coord(sq);
            area = Some(match area {
                None => BoundingBox {
                    min_row: r,
                    max_row: r,
                    min_col: c,
                    max_col: c,
                },
                Some(b) => BoundingBox {
                    min_row: b.min_row.min(r),
                    max_row: b.max_row.max(r),
                    min_col: b.min_col.min(c),
                    max_col: b.max_col.max(c),
                },
            });
        }
        area
    }

    /// Parses either the `Display` rendering or bare rows of `.`/`X`/`O`.
    /// Whitespace is ignored and leading row numbers are stripped; lines with
    /// nothing left (the column header, blank lines) are skipped.
    pub fn from_text(text: &str) -> Result<Self, BoardError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|ch| !ch.is_whitespace())
                    .skip_while(char::is_ascii_digit)
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE {
            let cols = rows.first().map_or(0, Vec::len);
            return Err(BoardError::Degenerate {
                rows: rows.len(),
                cols,
            });
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != BOARD_SIZE) {
            return Err(BoardError::Degenerate {
                rows: rows.len(),
                cols: bad.len(),
            });
        }

        let mut board = Self::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, &symbol) in row.iter().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or(BoardError::InvalidSymbol(symbol))?;
                if let Some(player) = cell.player() {
                    board.put(r, c, player);
                }
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..BOARD_SIZE {
            write!(f, " {c:2}")?;
        }
        writeln!(f)?;
        for r in 0..BOARD_SIZE {
            write!(f, "{r:2} ")?;
            for c in 0..BOARD_SIZE {
                write!(f, " {} ", self.get(r, c).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_board_empty());
        assert_eq!(board.stone_count(), 0);
        assert_eq!(board.empty_cells().count(), TOTAL_CELLS);
        assert!(board.bounding_box().is_none());
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::new();
        board.place(Move::new(7, 7), Player::A).unwrap();
        assert_eq!(board.get(7, 7), Cell::PlayerA);
        assert_eq!(board.stone_count(), 1);

        board.remove(7, 7);
        assert_eq!(board.get(7, 7), Cell::Empty);
        assert!(board.is_board_empty());
    }

    #[test]
    fn test_place_rejects_invalid_moves() {
        let mut board = Board::new();
        board.place(Move::new(0, 0), Player::A).unwrap();

        assert_eq!(
            board.place(Move::new(0, 0), Player::B),
            Err(MoveError::Occupied { row: 0, col: 0 })
        );
        assert_eq!(
            board.place(Move::new(15, 3), Player::B),
            Err(MoveError::OutOfBounds { row: 15, col: 3 })
        );
        assert_eq!(board.stone_count(), 1);
    }

    #[test]
    fn test_bounding_box() {
        let mut board = Board::new();
        board.put(3, 10, Player::A);
        board.put(9, 4, Player::B);
        let area = board.bounding_box().unwrap();
        assert_eq!(
            area,
            BoundingBox {
                min_row: 3,
                max_row: 9,
                min_col: 4,
                max_col: 10
            }
        );

        let expanded = area.expand(6);
        assert_eq!(expanded.min_row, 0);
        assert_eq!(expanded.max_col, BOARD_SIZE - 1);
    }

    #[test]
    fn test_text_round_trip() {
        let mut board = Board::new();
        board.put(0, 0, Player::A);
        board.put(14, 14, Player::B);
        board.put(7, 3, Player::A);

        let rendered = board.to_string();
        let parsed = Board::from_text(&rendered).unwrap();
        assert_eq!(parsed, board);
        assert_eq!(parsed.stone_count(), 3);
    }

    #[test]
    fn test_from_text_rejects_degenerate_dimensions() {
        let short = "...\n...\n...";
        assert_eq!(
            Board::from_text(short),
            Err(BoardError::Degenerate { rows: 3, cols: 3 })
        );

        let mut rows = vec![".".repeat(BOARD_SIZE); BOARD_SIZE];
        rows[4] = ".".repeat(BOARD_SIZE - 1);
        assert_eq!(
            Board::from_text(&rows.join("\n")),
            Err(BoardError::Degenerate {
                rows: BOARD_SIZE,
                cols: BOARD_SIZE - 1
            })
        );
    }

    #[test]
    fn test_from_text_rejects_unknown_symbols() {
        let mut rows = vec![".".repeat(BOARD_SIZE); BOARD_SIZE];
        rows[2] = format!("{}#", ".".repeat(BOARD_SIZE - 1));
        assert_eq!(
            Board::from_text(&rows.join("\n")),
            Err(BoardError::InvalidSymbol('#'))
        );
    }

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(Player::A.opponent(), Player::B);
        assert_eq!(Player::B.opponent().opponent(), Player::B);
        assert_eq!(Player::A.cell().player(), Some(Player::A));
    }
}
