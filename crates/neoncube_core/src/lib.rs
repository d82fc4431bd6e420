//! 3x3x3 twisty puzzle backend: cubie lattice, quarter-turn moves, undo
//! history, scrambles, and solved-state detection.
//!
//! Everything in this crate is instantaneous. Animation lives in
//! `neoncube_view`.

mod colors;
mod history;
mod lattice;
pub mod scramble;
mod solve;
mod timestamp;
mod twists;

#[cfg(test)]
mod tests;

/// Re-export of `cgmath`.
pub use cgmath;
/// Re-export of `chrono`.
pub use chrono;
pub use prelude::*;

pub use crate::timestamp::Timestamp;

/// Prelude of common imports.
pub mod prelude {
    pub use crate::colors::{Face, FaceColor, Rgb};
    pub use crate::history::MoveHistory;
    pub use crate::lattice::{Cubie, CubieId, Lattice, LatticeCoord, LatticeError, LayerCubies};
    pub use crate::scramble::{ScrambleParams, ScrambledLattice};
    pub use crate::solve::SolveStatus;
    pub use crate::twists::{Axis, Direction, Layer, Move, ParseMoveError};
    pub use crate::{Float, SPACING};
}

/// Floating-point type used for puzzle geometry.
pub type Float = f64;

/// Edge length of a single cubie.
pub const CUBIE_SIZE: Float = 1.0;
/// Gap between adjacent cubies.
pub const CUBIE_GAP: Float = 0.05;
/// Distance between the centers of adjacent cubies.
///
/// A cubie at lattice coordinate `c` sits at world position `c * SPACING`.
pub const SPACING: Float = CUBIE_SIZE + CUBIE_GAP;
