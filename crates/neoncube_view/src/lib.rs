//! Puzzle user interface state manager: animated layer rotations, shuffling,
//! undo, drag gestures, and the solved celebration.
//!
//! Rendering is left to the host, which implements [`PuzzleHost`] and calls
//! [`PuzzleView::tick()`] once per frame.

mod animations;
mod camera;
mod gesture;
mod host;
mod simulation;
mod view;


pub use animations::{CelebrationState, Continuation, TwistAnimation};
pub use camera::{PerspectiveCamera, PickHit};
pub use gesture::{DragState, ScreenRect, resolve_drag};
pub use host::{CameraHost, PuzzleHost};
pub use simulation::PuzzleSimulation;
pub use view::PuzzleView;
