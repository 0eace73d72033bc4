use std::collections::VecDeque;

use super::board::Pos;
use crate::error::GameError;

/// One player's live pieces, oldest first.
///
/// The engine keeps this in lockstep with the board: every entry names a
/// cell holding the player's color, and every such cell appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    positions: VecDeque<Pos>,
}

impl History {
    pub fn new() -> Self {
        History {
            positions: VecDeque::new(),
        }
    }

    pub fn push_newest(&mut self, pos: Pos) {
        self.positions.push_back(pos);
    }

    pub fn pop_oldest(&mut self) -> Result<Pos, GameError> {
        self.positions.pop_front().ok_or(GameError::EmptyHistory)
    }

    pub fn pop_newest(&mut self) -> Result<Pos, GameError> {
        self.positions.pop_back().ok_or(GameError::EmptyHistory)
    }

    pub fn oldest(&self) -> Option<Pos> {
        self.positions.front().copied()
    }

    pub fn newest(&self) -> Option<Pos> {
        self.positions.back().copied()
    }

    /// Replace every entry with `f(entry)`, keeping the order.
    pub fn rewrite_all<F>(&mut self, mut f: F)
    where
        F: FnMut(Pos) -> Pos,
    {
        for pos in self.positions.iter_mut() {
            *pos = f(*pos);
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(positions: &[(usize, usize)]) -> History {
        let mut history = History::new();
        for &(row, col) in positions {
            history.push_newest(Pos::new(row, col));
        }
        history
    }

    #[test]
    fn test_new_history_is_empty() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert_eq!(history.pop_oldest(), Err(GameError::EmptyHistory));
        assert_eq!(history.pop_newest(), Err(GameError::EmptyHistory));
        assert_eq!(history.oldest(), None);
    }

    #[test]
    fn test_push_keeps_order() {
        let history = history_of(&[(1, 1), (2, 2), (3, 3)]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.oldest(), Some(Pos::new(1, 1)));
        assert_eq!(history.newest(), Some(Pos::new(3, 3)));
        let all: Vec<Pos> = history.iter().collect();
        assert_eq!(all, vec![Pos::new(1, 1), Pos::new(2, 2), Pos::new(3, 3)]);
    }

    #[test]
    fn test_pop_from_both_ends() {
        let mut history = history_of(&[(5, 0), (4, 0), (5, 1)]);
        assert_eq!(history.pop_oldest().unwrap(), Pos::new(5, 0));
        assert_eq!(history.pop_newest().unwrap(), Pos::new(5, 1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop_newest().unwrap(), Pos::new(4, 0));
        assert!(history.is_empty());
        assert_eq!(history.pop_oldest(), Err(GameError::EmptyHistory));
    }

    #[test]
    fn test_duplicate_entries_are_kept() {
        let mut history = history_of(&[(5, 5), (5, 5)]);
        assert_eq!(history.len(), 2);
        history.pop_oldest().unwrap();
        assert_eq!(history.newest(), Some(Pos::new(5, 5)));
    }

    #[test]
    fn test_rewrite_all_preserves_order() {
        let mut history = history_of(&[(0, 0), (1, 2), (2, 1)]);
        history.rewrite_all(|pos| Pos::new(pos.row + 10, pos.col));
        let all: Vec<Pos> = history.iter().collect();
        assert_eq!(all, vec![Pos::new(10, 0), Pos::new(11, 2), Pos::new(12, 1)]);
    }

    #[test]
    fn test_large_history() {
        let mut history = History::new();
        for i in 0..1000 {
            history.push_newest(Pos::new(i, i));
        }
        assert_eq!(history.len(), 1000);
        assert_eq!(history.oldest(), Some(Pos::new(0, 0)));
        assert_eq!(history.newest(), Some(Pos::new(999, 999)));
    }
}
