use crate::engine::Evaluator;
use crate::logic::board::{Board, Cell, Player, BOARD_SIZE, TOTAL_CELLS, WIN_SIZE};

/// Segment scores indexed by `[open_ends][count]`. Counts of 0 and 1 never
/// score; see `eval_segment`.
pub const SCORES: [[i64; WIN_SIZE]; 3] = [
    [0, 0, 0, 0, 0],
    [0, 1, 10, 100, 1_000],       // one open end: 10^(count-1)
    [1, 10, 100, 1_000, 10_000],  // two open ends: 10^count
];

/// Upper bound on one side's total of non-winning segment scores: every
/// stone sits in four lines and no segment is worth more than
/// `SCORES[2][WIN_SIZE - 1]` per stone.
pub const MAX_NON_WINNING_TOTAL: i64 = TOTAL_CELLS as i64 * 4 * SCORES[2][WIN_SIZE - 1];

pub const WIN_SCORE: i64 = 10_i64.pow(WIN_SIZE as u32 + 3);

const _: () = assert!(WIN_SCORE > MAX_NON_WINNING_TOTAL);

/// A straight line of cells: a row, a column or a diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start_row: usize,
    pub start_col: usize,
    pub dr: isize,
    pub dc: usize,
    pub len: usize,
}

impl Line {
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub const fn coord(&self, i: usize) -> (usize, usize) {
        let row = (self.start_row as isize + self.dr * i as isize) as usize;
        (row, self.start_col + self.dc * i)
    }

    fn cell(&self, board: &Board, i: usize) -> Cell {
        let (r, c) = self.coord(i);
        board.get(r, c)
    }
}

/// All 88 lines of the board: 15 rows, 15 columns, 29 down-right and 29
/// up-right diagonals (corner diagonals of length 1 included).
pub fn lines() -> impl Iterator<Item = Line> {
    let rows = (0..BOARD_SIZE).map(|r| Line {
        start_row: r,
        start_col: 0,
        dr: 0,
        dc: 1,
        len: BOARD_SIZE,
    });
    let cols = (0..BOARD_SIZE).map(|c| Line {
        start_row: 0,
        start_col: c,
        dr: 1,
        dc: 0,
        len: BOARD_SIZE,
    });
    // Down-right, starting on the left edge then along the top edge.
    let backslash = (0..BOARD_SIZE)
        .map(|r| Line {
            start_row: r,
            start_col: 0,
            dr: 1,
            dc: 1,
            len: BOARD_SIZE - r,
        })
        .chain((1..BOARD_SIZE).map(|c| Line {
            start_row: 0,
            start_col: c,
            dr: 1,
            dc: 1,
            len: BOARD_SIZE - c,
        }));
    // Up-right, starting on the left edge then along the bottom edge.
    let slash = (0..BOARD_SIZE)
        .map(|r| Line {
            start_row: r,
            start_col: 0,
            dr: -1,
            dc: 1,
            len: r + 1,
        })
        .chain((1..BOARD_SIZE).map(|c| Line {
            start_row: BOARD_SIZE - 1,
            start_col: c,
            dr: -1,
            dc: 1,
            len: BOARD_SIZE - c,
        }));
    rows.chain(cols).chain(backslash).chain(slash)
}

pub fn eval_segment(count: usize, open_ends: usize) -> i64 {
    if count >= WIN_SIZE {
        return WIN_SCORE;
    }
    if count <= 1 {
        return 0;
    }
    SCORES
        .get(open_ends)
        .and_then(|row| row.get(count))
        .copied()
        .unwrap_or(0)
}

/// Sums the segment scores of `player`'s runs along one line.
pub fn eval_line(board: &Board, line: Line, player: Player) -> i64 {
    let target = player.cell();
    let mut score = 0;
    let mut count = 0;

    for i in 0..line.len {
        let current = line.cell(board, i);
        if current == target {
            count += 1;
            continue;
        }
        if count > 0 {
            let mut open_ends = usize::from(current == Cell::Empty);
            if i > count && line.cell(board, i - count - 1) == Cell::Empty {
                open_ends += 1;
            }
            score += eval_segment(count, open_ends);
            count = 0;
        }
    }
    if count > 0 {
        let before = line.len - count;
        let open_ends = usize::from(before > 0 && line.cell(board, before - 1) == Cell::Empty);
        score += eval_segment(count, open_ends);
    }
    score
}

/// Scores the whole board for `player`: own segments minus the opponent's.
pub fn evaluate(board: &Board, player: Player) -> i64 {
    let opponent = player.opponent();
    lines()
        .map(|line| eval_line(board, line, player) - eval_line(board, line, opponent))
        .sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineEvaluator;

impl Evaluator for LineEvaluator {
    fn evaluate(&self, board: &Board, player: Player) -> i64 {
        evaluate(board, player)
    }
}
