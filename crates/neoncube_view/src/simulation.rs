use neoncube_core::prelude::*;
use neoncube_core::scramble::random_move;
use neoncube_prefs::AnimationPreferences;
use web_time::{Duration, Instant};

use crate::animations::{Continuation, TwistAnimation};

/// Layer rotation state.
#[derive(Debug, Default, Clone)]
enum RotationState {
    /// No rotation in progress.
    #[default]
    Idle,
    /// One layer is rotating.
    Animating(TwistAnimation),
}

/// Shuffle in progress.
#[derive(Debug, Clone)]
struct ShuffleState {
    params: ScrambleParams,
    rng: rand_chacha::ChaCha12Rng,
    /// Moves started so far.
    moves: Vec<Move>,
}

/// Puzzle simulation, which manages the lattice, the layer rotation
/// animation, the undo history, and shuffling.
///
/// Time is always supplied by the caller.
#[derive(Debug, Default, Clone)]
pub struct PuzzleSimulation {
    /// Cubies, including any in-progress partial rotation.
    lattice: Lattice,
    /// Moves that can be undone.
    history: MoveHistory,
    /// Layer rotation animation.
    rotation: RotationState,
    /// Shuffle in progress, if any.
    shuffle: Option<ShuffleState>,
    /// Most recent shuffle, with the moves it applied.
    last_scramble: Option<(ScrambleParams, Vec<Move>)>,
    /// Whether a rotation has completed in a solved state that has not yet
    /// been handled by the UI.
    newly_solved: bool,
}
impl PuzzleSimulation {
    /// Constructs a new simulation with a solved puzzle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lattice, including any in-progress partial rotation.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
    /// Returns the undo history.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }
    /// Returns the most recent shuffle and the moves it has applied so far.
    pub fn last_scramble(&self) -> Option<(&ScrambleParams, &[Move])> {
        match &self.shuffle {
            Some(shuffle) => Some((&shuffle.params, &shuffle.moves)),
            None => {
                let (params, moves) = self.last_scramble.as_ref()?;
                Some((params, moves))
            }
        }
    }

    /// Returns whether a layer is rotating.
    pub fn is_animating(&self) -> bool {
        matches!(self.rotation, RotationState::Animating(_))
    }
    /// Returns whether a shuffle is in progress.
    pub fn is_shuffling(&self) -> bool {
        self.shuffle.is_some()
    }
    /// Returns the current rotation animation, if any.
    pub fn current_twist(&self) -> Option<&TwistAnimation> {
        match &self.rotation {
            RotationState::Idle => None,
            RotationState::Animating(anim) => Some(anim),
        }
    }
    /// Returns the linear progress of the current rotation from 0.0 to 1.0,
    /// or `None` if no layer is rotating.
    pub fn animation_progress(&self, now: Instant) -> Option<f32> {
        Some(self.current_twist()?.progress(now))
    }

    /// Starts rotating a layer without touching the undo history. Returns
    /// whether the rotation started.
    ///
    /// Does nothing if a layer is already rotating.
    pub fn start_twist(&mut self, twist: Move, duration: Duration, now: Instant) -> bool {
        if self.is_animating() {
            log::trace!("ignoring twist {twist} during animation");
            return false;
        }
        self.start_twist_internal(twist, duration, Continuation::None, now)
    }
    /// Starts rotating a layer, even if a layer is already rotating.
    fn start_twist_internal(
        &mut self,
        twist: Move,
        duration: Duration,
        continuation: Continuation,
        now: Instant,
    ) -> bool {
        match TwistAnimation::new(&self.lattice, twist, now, duration, continuation) {
            Ok(anim) => {
                log::debug!("starting twist {twist}");
                self.rotation = RotationState::Animating(anim);
                true
            }
            Err(e) => {
                log::debug!("cannot start twist {twist}: {e}");
                false
            }
        }
    }

    /// Rotates a layer as a user move and records it in the undo history.
    /// Returns whether the rotation started.
    ///
    /// Does nothing during a rotation or shuffle.
    pub fn do_move(&mut self, twist: Move, prefs: &AnimationPreferences, now: Instant) -> bool {
        if self.is_shuffling() {
            log::trace!("ignoring twist {twist} during shuffle");
            return false;
        }
        let started = self.start_twist(twist, secs_to_duration(prefs.twist_duration), now);
        if started {
            self.history.push(twist);
        }
        started
    }
    /// Undoes the most recent user move by rotating its layer the opposite
    /// way. Returns whether the rotation started.
    ///
    /// Does nothing during a rotation or shuffle or if there is nothing to
    /// undo.
    pub fn undo(&mut self, prefs: &AnimationPreferences, now: Instant) -> bool {
        if self.is_animating() || self.is_shuffling() {
            log::trace!("ignoring undo during animation");
            return false;
        }
        let Some(last) = self.history.last() else {
            return false;
        };
        let started = self.start_twist(last.rev(), secs_to_duration(prefs.twist_duration), now);
        if started {
            self.history.pop();
        }
        started
    }

    /// Clears the undo history and begins shuffling the puzzle, one animated
    /// move at a time. Returns whether the shuffle started.
    ///
    /// Does nothing during a rotation.
    pub fn shuffle(
        &mut self,
        params: ScrambleParams,
        prefs: &AnimationPreferences,
        now: Instant,
    ) -> bool {
        if self.is_animating() || self.is_shuffling() {
            log::trace!("ignoring shuffle during animation");
            return false;
        }
        log::info!("shuffling with {} moves (seed {})", params.length, params.seed);
        self.history.clear();
        self.newly_solved = false;
        self.shuffle = Some(ShuffleState {
            rng: params.rng(),
            params,
            moves: vec![],
        });
        self.next_shuffle_move(prefs, now);
        true
    }
    /// Starts the next shuffle move, or ends the shuffle if there are none
    /// left.
    fn next_shuffle_move(&mut self, prefs: &AnimationPreferences, now: Instant) {
        let Some(shuffle) = &mut self.shuffle else {
            return;
        };
        if shuffle.moves.len() >= shuffle.params.length as usize {
            self.end_shuffle();
            return;
        }
        let twist = random_move(&mut shuffle.rng);
        shuffle.moves.push(twist);
        let duration = secs_to_duration(prefs.shuffle_twist_duration);
        if !self.start_twist_internal(twist, duration, Continuation::Shuffle, now) {
            log::warn!("aborting shuffle");
            self.end_shuffle();
        }
    }
    fn end_shuffle(&mut self) {
        if let Some(shuffle) = self.shuffle.take() {
            log::info!("shuffle complete: {}", Move::format_sequence(shuffle.moves.iter().copied()));
            self.last_scramble = Some((shuffle.params, shuffle.moves));
        }
    }

    /// Replaces the puzzle with a solved one and clears the undo history.
    /// Returns whether the puzzle was reset.
    ///
    /// Does nothing during a rotation.
    pub fn reset(&mut self) -> bool {
        if self.is_animating() {
            log::trace!("ignoring reset during animation");
            return false;
        }
        log::info!("resetting puzzle");
        *self = Self::new();
        true
    }

    /// Advances the rotation animation to time `now`. Returns whether the
    /// puzzle must be redrawn.
    ///
    /// When a rotation completes, its cubies are snapped to the lattice, its
    /// continuation runs, and then (unless a shuffle was in progress) the
    /// puzzle is checked for a solved state.
    pub fn step(&mut self, prefs: &AnimationPreferences, now: Instant) -> bool {
        let RotationState::Animating(anim) = &self.rotation else {
            return false;
        };

        if anim.progress(now) < 1.0 {
            let angle = anim.angle(now, prefs.twist_interpolation);
            anim.apply(&mut self.lattice, angle);
            return true;
        }

        let RotationState::Animating(anim) = std::mem::take(&mut self.rotation) else {
            return false;
        };
        anim.finish(&mut self.lattice);
        log::debug!("finished twist {}", anim.twist);

        let was_shuffling = self.is_shuffling();
        match anim.continuation {
            Continuation::None => (),
            Continuation::Shuffle => self.next_shuffle_move(prefs, now),
        }
        if !was_shuffling {
            self.check_solved();
        }

        true
    }

    fn check_solved(&mut self) {
        match self.lattice.solve_status() {
            SolveStatus::Solved => {
                log::info!("puzzle solved");
                self.newly_solved = true;
            }
            SolveStatus::Unsolved => (),
            SolveStatus::Unsettled => log::warn!("solve check found a layer out of place"),
        }
    }

    /// Returns whether the puzzle was just solved, and then marks the solve as
    /// handled.
    pub fn handle_newly_solved_state(&mut self) -> bool {
        std::mem::take(&mut self.newly_solved)
    }
}

/// Converts seconds from preferences to a duration, rounded to the nearest
/// microsecond. Negative and non-finite values become zero.
fn secs_to_duration(secs: f32) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_micros((secs as f64 * 1e6).round() as u64)
    } else {
        Duration::ZERO
    }
}
