use cgmath::{Vector2, Vector3};
use neoncube_core::prelude::*;

use crate::{PerspectiveCamera, PickHit};

/// Frontend that displays a [`crate::PuzzleView`].
///
/// The view calls into the host for geometry queries and for side effects that
/// it does not own, such as the orbit camera control.
pub trait PuzzleHost {
    /// Returns the nearest cubie under a point in normalized device
    /// coordinates.
    fn pick(&self, lattice: &Lattice, ndc: Vector2<Float>) -> Option<PickHit>;
    /// Projects a world-space point to normalized device coordinates.
    fn project(&self, point: Vector3<Float>) -> Vector2<Float>;
    /// Enables or disables dragging to orbit the camera.
    fn set_orbit_controls_enabled(&mut self, enabled: bool);
    /// Shows the "solved" message and starts the celebration effect.
    fn celebrate(&mut self);
}

/// Host backed by a [`PerspectiveCamera`], which records the side effects
/// requested of it instead of displaying anything.
#[derive(Debug, Default, Clone)]
pub struct CameraHost {
    /// Camera used for picking and projection.
    pub camera: PerspectiveCamera,
    /// Whether dragging orbits the camera.
    pub orbit_controls_enabled: bool,
    /// Number of times the celebration has been triggered.
    pub celebrations: usize,
}
impl PuzzleHost for CameraHost {
    fn pick(&self, lattice: &Lattice, ndc: Vector2<Float>) -> Option<PickHit> {
        self.camera.pick(lattice, ndc)
    }
    fn project(&self, point: Vector3<Float>) -> Vector2<Float> {
        self.camera.project(point)
    }
    fn set_orbit_controls_enabled(&mut self, enabled: bool) {
        self.orbit_controls_enabled = enabled;
    }
    fn celebrate(&mut self) {
        self.celebrations += 1;
    }
}
