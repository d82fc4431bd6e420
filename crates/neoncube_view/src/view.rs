use cgmath::Vector2;
use neoncube_core::prelude::*;
use neoncube_prefs::{Preferences, PuzzleMode};
use web_time::Instant;

use crate::{CelebrationState, DragState, PuzzleHost, PuzzleSimulation, ScreenRect, resolve_drag};

/// Interactive puzzle: the simulation plus interaction mode, drag gestures,
/// and the solved celebration.
#[derive(Debug, Clone)]
pub struct PuzzleView {
    /// Puzzle state, animation, and undo history.
    pub sim: PuzzleSimulation,
    /// User preferences.
    pub prefs: Preferences,

    mode: PuzzleMode,
    /// Face drag in progress, if any.
    drag: Option<DragState>,
    celebration: CelebrationState,
}
impl PuzzleView {
    /// Constructs a view with a solved puzzle in the mode given by the
    /// preferences, and shuffles it if the preferences say to.
    pub fn new(prefs: Preferences, host: &mut impl PuzzleHost, now: Instant) -> Self {
        let mode = prefs.interaction.initial_mode;
        let shuffle_on_start = prefs.shuffle.on_start;
        let mut view = Self {
            sim: PuzzleSimulation::new(),
            prefs,

            mode,
            drag: None,
            celebration: CelebrationState::default(),
        };
        view.set_mode(mode, host);
        if shuffle_on_start {
            view.shuffle(now);
        }
        view
    }

    /// Returns the interaction mode.
    pub fn mode(&self) -> PuzzleMode {
        self.mode
    }
    /// Sets the interaction mode, cancelling any drag in progress.
    pub fn set_mode(&mut self, mode: PuzzleMode, host: &mut impl PuzzleHost) {
        log::debug!("setting mode to {mode:?}");
        self.mode = mode;
        self.drag = None;
        host.set_orbit_controls_enabled(mode == PuzzleMode::View);
    }
    /// Returns the face drag in progress, if any.
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Shuffles the puzzle with a fresh random seed. Returns whether the
    /// shuffle started.
    pub fn shuffle(&mut self, now: Instant) -> bool {
        self.shuffle_with_params(ScrambleParams::new(self.prefs.shuffle.length), now)
    }
    /// Shuffles the puzzle with specific parameters. Returns whether the
    /// shuffle started.
    pub fn shuffle_with_params(&mut self, params: ScrambleParams, now: Instant) -> bool {
        let started = self.sim.shuffle(params, &self.prefs.animation, now);
        if started {
            self.celebration.hide();
            self.drag = None;
        }
        started
    }
    /// Resets the puzzle to a solved state. Returns whether it was reset.
    pub fn reset(&mut self) -> bool {
        let reset = self.sim.reset();
        if reset {
            self.celebration.hide();
            self.drag = None;
        }
        reset
    }
    /// Undoes the last user move. Returns whether a rotation started.
    pub fn undo(&mut self, now: Instant) -> bool {
        self.sim.undo(&self.prefs.animation, now)
    }
    /// Does a user move and records it in the undo history. Returns whether a
    /// rotation started.
    pub fn do_move(&mut self, m: Move, now: Instant) -> bool {
        self.sim.do_move(m, &self.prefs.animation, now)
    }

    /// Handles a mouse button or touch press at client pixel coordinates.
    pub fn pointer_down(
        &mut self,
        rect: &ScreenRect,
        pointer: Vector2<Float>,
        host: &mut impl PuzzleHost,
    ) {
        if self.sim.is_animating() {
            log::trace!("ignoring press during animation");
            return;
        }

        match self.mode {
            PuzzleMode::View => host.set_orbit_controls_enabled(true),
            PuzzleMode::Fixed => {
                let ndc = rect.pointer_to_ndc(pointer.x, pointer.y);
                let lattice = self.sim.lattice();
                if let Some(hit) = host.pick(lattice, ndc)
                    && let Some(face_normal) = hit.world_normal(lattice)
                {
                    log::trace!("pressed {} at {:?}", hit.cubie, hit.point);
                    self.drag = Some(DragState {
                        start: pointer,
                        hit_point: hit.point,
                        face_normal,
                        cubie: hit.cubie,
                    });
                }
                host.set_orbit_controls_enabled(false);
            }
        }
    }
    /// Handles pointer motion at client pixel coordinates. Returns the move
    /// that was started, if any.
    ///
    /// Once the pointer has moved far enough, the drag is resolved to a move
    /// and ends, so each press turns at most one layer. The orbit control
    /// stays disabled in fixed mode until the next press.
    pub fn pointer_move(
        &mut self,
        pointer: Vector2<Float>,
        host: &mut impl PuzzleHost,
        now: Instant,
    ) -> Option<Move> {
        if self.sim.is_animating() {
            return None;
        }
        let drag = self.drag?;
        let threshold = self.prefs.interaction.drag_threshold as Float;
        let delta = drag.delta(pointer, threshold)?;

        self.drag = None;
        host.set_orbit_controls_enabled(self.mode == PuzzleMode::View);

        let min_alignment = self.prefs.interaction.min_drag_alignment as Float;
        let lattice = self.sim.lattice();
        let m = resolve_drag(&drag, lattice, delta, |p| host.project(p), min_alignment)?;
        self.do_move(m, now).then_some(m)
    }
    /// Handles a mouse button or touch release.
    pub fn pointer_up(&mut self, host: &mut impl PuzzleHost) {
        self.drag = None;
        host.set_orbit_controls_enabled(self.mode == PuzzleMode::View);
    }

    /// Advances animations to time `now`. Returns whether the puzzle must be
    /// redrawn.
    ///
    /// Calls [`PuzzleHost::celebrate()`] once each time the puzzle becomes
    /// solved.
    pub fn tick(&mut self, now: Instant, host: &mut impl PuzzleHost) -> bool {
        let mut needs_redraw = self.sim.step(&self.prefs.animation, now);
        if self.sim.handle_newly_solved_state() {
            host.celebrate();
            self.celebration.start(now);
        }
        needs_redraw |= self.celebration.proceed(now, &self.prefs.animation);
        needs_redraw
    }

    /// Returns the progress of the celebration effect from 0.0 to 1.0, or
    /// `None` if it is not playing.
    pub fn celebration_progress(&self, now: Instant) -> Option<f32> {
        self.celebration.progress(now, &self.prefs.animation)
    }
    /// Returns whether the "solved" message should be shown.
    pub fn message_visible(&self, now: Instant) -> bool {
        self.celebration.message_visible(now, &self.prefs.animation)
    }
}
