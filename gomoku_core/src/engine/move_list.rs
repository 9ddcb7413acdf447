use crate::engine::Move;
use crate::logic::board::TOTAL_CELLS;

// A candidate set can never exceed the number of cells.
const MAX_MOVES: usize = TOTAL_CELLS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i64,
}

pub struct MoveList {
    entries: [ScoredMove; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            entries: [ScoredMove::default(); MAX_MOVES],
            count: 0,
        }
    }
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move, score: i64) {
        if let Some(slot) = self.entries.get_mut(self.count) {
            *slot = ScoredMove { mv, score };
            self.count += 1;
        } else {
            debug_assert!(false, "MoveList overflow! Max moves: {MAX_MOVES}");
        }
    }

    pub fn truncate(&mut self, len: usize) {
        if len < self.count {
            self.count = len;
        }
    }

    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn first(&self) -> Option<Move> {
        self.iter().next().map(|entry| entry.mv)
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.iter().any(|entry| entry.mv == mv)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredMove> {
        self.entries.get(0..self.count).unwrap_or(&[]).iter()
    }

    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.iter().map(|entry| entry.mv)
    }

    /// Stable sort, so equal scores keep insertion order.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&ScoredMove, &ScoredMove) -> std::cmp::Ordering,
    {
        if let Some(slice) = self.entries.get_mut(0..self.count) {
            slice.sort_by(|a, b| compare(a, b));
        }
    }

    pub fn sort_descending(&mut self) {
        self.sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub fn sort_ascending(&mut self) {
        self.sort_by(|a, b| a.score.cmp(&b.score));
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a ScoredMove;
    type IntoIter = std::slice::Iter<'a, ScoredMove>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
