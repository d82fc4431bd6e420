use crate::Move;

/// Stack of user-driven moves that can be undone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
}
impl MoveHistory {
    /// Constructs an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a move.
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }
    /// Removes and returns the most recent move.
    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }
    /// Returns the most recent move.
    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }
    /// Removes all moves.
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Returns the number of moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }
    /// Returns whether there are no moves to undo.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
    /// Iterates over moves from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }
}
