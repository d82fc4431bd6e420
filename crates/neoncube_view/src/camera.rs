use cgmath::{
    Deg, EuclideanSpace, InnerSpace, Matrix, Matrix4, Point3, SquareMatrix, Vector2, Vector3,
    Vector4, Zero,
};
use float_ord::FloatOrd;
use neoncube_core::CUBIE_SIZE;
use neoncube_core::prelude::*;
use strum::VariantArray;

const DEFAULT_FOV: Deg<Float> = Deg(45.0);
const NEAR_PLANE: Float = 0.1;
const FAR_PLANE: Float = 1000.0;

/// Perspective camera looking at the puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Position of the camera.
    pub eye: Point3<Float>,
    /// Point that the camera looks at.
    pub target: Point3<Float>,
    /// Direction that is up on screen.
    pub up: Vector3<Float>,
    /// Vertical field of view.
    pub fovy: Deg<Float>,
    /// Width divided by height.
    pub aspect: Float,
}
impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: Point3::new(5.0, 5.0, 7.0),
            target: Point3::origin(),
            up: Vector3::unit_y(),
            fovy: DEFAULT_FOV,
            aspect: 1.0,
        }
    }
}
impl PerspectiveCamera {
    /// Returns the view-projection matrix, which transforms world space to
    /// clip space.
    pub fn view_projection(&self) -> Matrix4<Float> {
        let proj = cgmath::perspective(self.fovy, self.aspect, NEAR_PLANE, FAR_PLANE);
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        proj * view
    }

    /// Projects a world-space point to normalized device coordinates.
    pub fn project(&self, point: Vector3<Float>) -> Vector2<Float> {
        let clip = self.view_projection() * point.extend(1.0);
        Vector2::new(clip.x / clip.w, clip.y / clip.w)
    }

    /// Returns the world-space ray through a point in normalized device
    /// coordinates, as an origin on the near plane and a unit direction.
    pub fn ray(&self, ndc: Vector2<Float>) -> Option<(Point3<Float>, Vector3<Float>)> {
        let inv = self.view_projection().invert()?;
        let unproject = |z| Point3::from_homogeneous(inv * Vector4::new(ndc.x, ndc.y, z, 1.0));
        let near = unproject(-1.0);
        let far = unproject(1.0);
        Some((near, (far - near).normalize()))
    }

    /// Returns the nearest cubie under a point in normalized device
    /// coordinates.
    pub fn pick(&self, lattice: &Lattice, ndc: Vector2<Float>) -> Option<PickHit> {
        let (origin, dir) = self.ray(ndc)?;
        lattice
            .iter()
            .filter_map(|(id, cubie)| {
                // Intersect in the cubie's local frame, where it is an
                // axis-aligned box.
                let inv_rot = cubie.rotation().transpose();
                let local_origin = inv_rot * (origin.to_vec() - cubie.position());
                let local_dir = inv_rot * dir;
                let (distance, local_normal) =
                    ray_box_intersection(local_origin, local_dir, CUBIE_SIZE / 2.0)?;
                Some(PickHit {
                    cubie: id,
                    distance,
                    point: origin.to_vec() + dir * distance,
                    local_normal,
                })
            })
            .min_by_key(|hit| FloatOrd(hit.distance))
    }
}

/// Ray intersection with a cubie.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    /// Cubie that was hit.
    pub cubie: CubieId,
    /// Distance from the ray origin.
    pub distance: Float,
    /// World-space point on the surface of the cubie.
    pub point: Vector3<Float>,
    /// Normal of the face that was hit, in the cubie's local frame.
    pub local_normal: Vector3<Float>,
}
impl PickHit {
    /// Returns the normal of the face that was hit in world space, rounded to
    /// an axis-aligned unit vector.
    pub fn world_normal(&self, lattice: &Lattice) -> Option<Vector3<Float>> {
        let cubie = lattice.get(self.cubie)?;
        Some((cubie.rotation() * self.local_normal).map(|x| x.round()))
    }
}

/// Intersects a ray with the box `[-half, half]^3`. Returns the distance to the
/// entry point and the outward normal of the face entered.
fn ray_box_intersection(
    origin: Vector3<Float>,
    dir: Vector3<Float>,
    half: Float,
) -> Option<(Float, Vector3<Float>)> {
    let mut t_near = Float::NEG_INFINITY;
    let mut t_far = Float::INFINITY;
    let mut normal = Vector3::zero();
    for &axis in Axis::VARIANTS {
        let i = axis.index();
        if dir[i].abs() < 1e-12 {
            if origin[i].abs() > half {
                return None;
            }
            continue;
        }
        let t1 = (-half - origin[i]) / dir[i];
        let t2 = (half - origin[i]) / dir[i];
        let (t_min, t_max) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if t_min > t_near {
            t_near = t_min;
            normal = axis.unit_vector() * -dir[i].signum();
        }
        t_far = t_far.min(t_max);
    }
    (t_near <= t_far && t_near >= 0.0).then_some((t_near, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord_of(lattice: &Lattice, hit: &PickHit) -> LatticeCoord {
        lattice.get(hit.cubie).unwrap().coord()
    }

    #[test]
    fn test_project_origin_to_center() {
        let camera = PerspectiveCamera::default();
        let p = camera.project(Vector3::zero());
        assert!(p.magnitude() < 1e-9, "{p:?}");

        // +Y points up on screen.
        let up = camera.project(Vector3::unit_y());
        assert!(up.y > 0.0);
    }

    #[test]
    fn test_pick_front_face() {
        let camera = PerspectiveCamera::default();
        let lattice = Lattice::new_solved();

        let face_center = Vector3::new(0.0, 0.0, SPACING + CUBIE_SIZE / 2.0);
        let hit = camera.pick(&lattice, camera.project(face_center)).unwrap();
        assert_eq!(coord_of(&lattice, &hit), LatticeCoord([0, 0, 1]));
        assert_eq!(hit.local_normal, Vector3::unit_z());
        assert_eq!(hit.world_normal(&lattice), Some(Vector3::unit_z()));
        assert!((hit.point - face_center).magnitude() < 1e-6);
    }

    #[test]
    fn test_pick_rotated_cubie() {
        let camera = PerspectiveCamera::default();
        let mut lattice = Lattice::new_solved();
        // Bring the top face down to the front.
        lattice.apply_move("x1".parse().unwrap()).unwrap();

        let point = Vector3::new(SPACING, 0.0, SPACING + CUBIE_SIZE / 2.0);
        let hit = camera.pick(&lattice, camera.project(point)).unwrap();
        let cubie = lattice.get(hit.cubie).unwrap();
        assert_eq!(cubie.home(), LatticeCoord([1, 1, 0]));
        assert_eq!(hit.local_normal, Vector3::unit_y());
        assert_eq!(hit.world_normal(&lattice), Some(Vector3::unit_z()));
    }

    #[test]
    fn test_pick_miss() {
        let camera = PerspectiveCamera::default();
        let lattice = Lattice::new_solved();
        assert_eq!(camera.pick(&lattice, Vector2::new(0.98, -0.98)), None);
    }

    #[test]
    fn test_ray_box_intersection() {
        let hit = ray_box_intersection(Vector3::new(0.2, 0.1, 5.0), -Vector3::unit_z(), 0.5);
        assert_eq!(hit, Some((4.5, Vector3::unit_z())));
        let miss = ray_box_intersection(Vector3::new(0.7, 0.0, 5.0), -Vector3::unit_z(), 0.5);
        assert_eq!(miss, None);
        let behind = ray_box_intersection(Vector3::new(0.0, 0.0, 5.0), Vector3::unit_z(), 0.5);
        assert_eq!(behind, None);
    }
}
