//! Tests combining the lattice, history, and solve checker.

use pretty_assertions::assert_eq;

use crate::prelude::*;

/// Applies a user move instantly and records it.
fn do_move(lattice: &mut Lattice, history: &mut MoveHistory, m: Move) {
    lattice.apply_move(m).expect("move failed");
    history.push(m);
}

/// Undoes the most recent move instantly.
fn undo(lattice: &mut Lattice, history: &mut MoveHistory) {
    if let Some(m) = history.pop() {
        lattice.apply_move(m.rev()).expect("undo failed");
    }
}

#[test]
fn test_history_law() {
    let moves = ScrambleParams::new(25).generate();
    let mut lattice = Lattice::new_solved();
    let mut history = MoveHistory::new();
    let initial = lattice.clone();

    for (i, &m) in moves.iter().enumerate() {
        do_move(&mut lattice, &mut history, m);
        assert_eq!(history.len(), i + 1);
    }
    for _ in &moves {
        undo(&mut lattice, &mut history);
    }
    assert_eq!(history.len(), 0);
    assert_eq!(lattice, initial);
}

#[test]
fn test_undo_restores_solved_state() {
    let mut lattice = Lattice::new_solved();
    let mut history = MoveHistory::new();
    do_move(&mut lattice, &mut history, "x1".parse().unwrap());
    assert_eq!(lattice.solve_status(), SolveStatus::Unsolved);
    undo(&mut lattice, &mut history);
    assert_eq!(lattice.solve_status(), SolveStatus::Solved);
}

#[test]
fn test_sexy_move_has_order_six() {
    // (R U R' U') repeated six times is the identity on a 3x3x3.
    let seq = Move::parse_sequence("x1' y1' x1 y1").unwrap();
    let mut lattice = Lattice::new_solved();
    for i in 1..=6 {
        lattice.apply_moves(seq.iter().copied()).unwrap();
        assert_eq!(lattice.is_solved(), i == 6, "after {i} repetitions");
    }
    assert_eq!(lattice, Lattice::new_solved());
}
