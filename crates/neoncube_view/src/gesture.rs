use cgmath::{InnerSpace, Vector2, Vector3};
use float_ord::FloatOrd;
use neoncube_core::prelude::*;
use strum::VariantArray;

/// Distance along the tangent used to measure its on-screen direction.
const TANGENT_PROBE_LENGTH: Float = 0.1;
/// Tangents shorter than this (squared) are too close to the axis to drive a
/// rotation.
const MIN_TANGENT_LENGTH_SQUARED: Float = 0.01;

/// Rectangle of the drawing surface in client pixel coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenRect {
    /// X coordinate of the left edge.
    pub left: Float,
    /// Y coordinate of the top edge.
    pub top: Float,
    /// Width in pixels.
    pub width: Float,
    /// Height in pixels.
    pub height: Float,
}
impl ScreenRect {
    /// Constructs a rectangle at the origin.
    pub fn new(width: Float, height: Float) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Converts a pointer position in client pixels (Y down) to normalized
    /// device coordinates (Y up, each axis from -1 to 1).
    pub fn pointer_to_ndc(&self, x: Float, y: Float) -> Vector2<Float> {
        Vector2::new(
            (x - self.left) / self.width * 2.0 - 1.0,
            -((y - self.top) / self.height * 2.0 - 1.0),
        )
    }
    /// Converts normalized device coordinates to a pointer position in client
    /// pixels.
    pub fn ndc_to_pointer(&self, ndc: Vector2<Float>) -> Vector2<Float> {
        Vector2::new(
            (ndc.x + 1.0) / 2.0 * self.width + self.left,
            (1.0 - ndc.y) / 2.0 * self.height + self.top,
        )
    }
}

/// Face drag that has begun but not yet turned a layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragState {
    /// Pointer position where the drag started, in client pixels.
    pub start: Vector2<Float>,
    /// World-space point on the cubie that was pressed.
    pub hit_point: Vector3<Float>,
    /// World-space normal of the face that was pressed.
    pub face_normal: Vector3<Float>,
    /// Cubie that was pressed.
    pub cubie: CubieId,
}
impl DragState {
    /// Returns the pointer movement since the start of the drag, or `None` if
    /// it has not exceeded `threshold` pixels along either screen axis.
    pub fn delta(&self, pointer: Vector2<Float>, threshold: Float) -> Option<Vector2<Float>> {
        let delta = pointer - self.start;
        (delta.x.abs() >= threshold || delta.y.abs() >= threshold).then_some(delta)
    }
}

/// Resolves a drag gesture to a quarter turn.
///
/// `delta` is the pointer movement in client pixels (Y down) and `project`
/// maps world-space points to normalized device coordinates. For each axis,
/// the on-screen direction in which a positive rotation would move the pressed
/// point is compared to the drag direction; the axis whose direction is best
/// aligned (or anti-aligned) with the drag wins.
///
/// Returns `None` if no axis is aligned with the drag by at least
/// `min_alignment`.
pub fn resolve_drag(
    drag: &DragState,
    lattice: &Lattice,
    delta: Vector2<Float>,
    project: impl Fn(Vector3<Float>) -> Vector2<Float>,
    min_alignment: Float,
) -> Option<Move> {
    let mouse_dir = Vector2::new(delta.x, -delta.y).normalize();
    let p = drag.hit_point;
    let p_screen = project(p);

    let (axis, score) = Axis::VARIANTS
        .iter()
        .filter_map(|&axis| {
            let tangent = axis.unit_vector().cross(p);
            if tangent.magnitude2() < MIN_TANGENT_LENGTH_SQUARED {
                return None;
            }
            let probe = project(p + tangent.normalize() * TANGENT_PROBE_LENGTH);
            let screen_dir = (probe - p_screen).normalize();
            let score = mouse_dir.dot(screen_dir);
            score.is_finite().then_some((axis, score))
        })
        .max_by_key(|&(_, score)| FloatOrd(score.abs()))?;

    if score.abs() < min_alignment {
        log::trace!("ignoring ambiguous drag (best alignment {score:.3} on axis {axis})");
        return None;
    }

    let cubie = lattice.get(drag.cubie)?;
    let layer = Layer::from_world_coordinate(axis.component(cubie.position()))?;
    let direction = Direction::from_signum(score)?;
    Some(Move::new(axis, layer, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PerspectiveCamera;

    fn drag_on(lattice: &Lattice, coord: [i8; 3], hit_point: Vector3<Float>) -> DragState {
        let (cubie, _) = lattice
            .iter()
            .find(|(_, c)| c.coord() == LatticeCoord(coord))
            .unwrap();
        DragState {
            start: Vector2::new(400.0, 400.0),
            hit_point,
            face_normal: Vector3::unit_z(),
            cubie,
        }
    }

    #[test]
    fn test_pointer_to_ndc() {
        let rect = ScreenRect {
            left: 100.0,
            top: 50.0,
            width: 800.0,
            height: 400.0,
        };
        assert_eq!(rect.pointer_to_ndc(100.0, 50.0), Vector2::new(-1.0, 1.0));
        assert_eq!(rect.pointer_to_ndc(500.0, 250.0), Vector2::new(0.0, 0.0));
        assert_eq!(rect.pointer_to_ndc(900.0, 450.0), Vector2::new(1.0, -1.0));
        let p = Vector2::new(123.0, 321.0);
        assert!((rect.ndc_to_pointer(rect.pointer_to_ndc(p.x, p.y)) - p).magnitude() < 1e-9);
    }

    #[test]
    fn test_drag_threshold() {
        let drag = DragState {
            start: Vector2::new(10.0, 10.0),
            hit_point: Vector3::unit_z(),
            face_normal: Vector3::unit_z(),
            cubie: CubieId(0),
        };
        assert_eq!(drag.delta(Vector2::new(19.0, 1.0), 10.0), None);
        assert_eq!(
            drag.delta(Vector2::new(20.0, 12.0), 10.0),
            Some(Vector2::new(10.0, 2.0)),
        );
        assert_eq!(
            drag.delta(Vector2::new(10.0, -5.0), 10.0),
            Some(Vector2::new(0.0, -15.0)),
        );
    }

    #[test]
    fn test_vertical_drag_never_uses_axis_through_hit_point() {
        let lattice = Lattice::new_solved();
        let drag = drag_on(&lattice, [1, 0, 0], Vector3::unit_x());
        let camera = PerspectiveCamera::default();
        let projections: [&dyn Fn(Vector3<Float>) -> Vector2<Float>; 2] =
            [&|p: Vector3<Float>| camera.project(p), &|p: Vector3<Float>| {
                Vector2::new(p.x + p.z * 0.3, p.y)
            }];

        for project in projections {
            for dy in [-40.0, -15.0, 15.0, 40.0] {
                for dx in [-3.0, 0.0, 3.0] {
                    let delta = Vector2::new(dx, dy);
                    if let Some(m) = resolve_drag(&drag, &lattice, delta, project, 0.5) {
                        assert_ne!(m.axis, Axis::X, "drag {delta:?} chose {m}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_front_face_drags() {
        let lattice = Lattice::new_solved();
        let camera = PerspectiveCamera::default();
        let project = |p: Vector3<Float>| camera.project(p);
        let face = SPACING + 0.5;

        // Center of the front face.
        let drag = drag_on(&lattice, [0, 0, 1], Vector3::new(0.0, 0.0, face));
        let right = resolve_drag(&drag, &lattice, Vector2::new(20.0, 0.0), project, 0.5);
        assert_eq!(right, Some("y0".parse().unwrap()));
        let left = resolve_drag(&drag, &lattice, Vector2::new(-20.0, 0.0), project, 0.5);
        assert_eq!(left, Some("y0'".parse().unwrap()));
        // Screen Y grows downward.
        let up = resolve_drag(&drag, &lattice, Vector2::new(0.0, -20.0), project, 0.5);
        assert_eq!(up, Some("x0'".parse().unwrap()));

        // Top-right cubie of the front face turns the outer layers.
        let drag = drag_on(&lattice, [1, 1, 1], Vector3::new(SPACING, SPACING, face));
        let right = resolve_drag(&drag, &lattice, Vector2::new(20.0, 0.0), project, 0.5);
        assert_eq!(right, Some("y1".parse().unwrap()));
        let down = resolve_drag(&drag, &lattice, Vector2::new(0.0, 20.0), project, 0.5);
        assert_eq!(down, Some("x1".parse().unwrap()));
    }

    #[test]
    fn test_ambiguous_drag_is_rejected() {
        let lattice = Lattice::new_solved();
        let drag = drag_on(&lattice, [0, 0, 1], Vector3::new(0.0, 0.0, SPACING + 0.5));
        // Orthographic view straight down the Z axis, where the X and Y
        // tangents are perpendicular on screen.
        let project = |p: Vector3<Float>| Vector2::new(p.x, p.y);
        let diagonal = Vector2::new(20.0, -20.0);
        assert!(resolve_drag(&drag, &lattice, diagonal, project, 0.5).is_some());
        assert_eq!(resolve_drag(&drag, &lattice, diagonal, project, 0.75), None);
    }
}
