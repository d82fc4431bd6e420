use std::fmt;

use cgmath::{InnerSpace, Matrix3, Rad, SquareMatrix, Vector3};
use itertools::Itertools;
use smallvec::SmallVec;
use strum::VariantArray;

use crate::{Axis, Face, FaceColor, Float, Layer, Move, SPACING};

/// Number of cubies in one layer.
pub const CUBIES_PER_LAYER: usize = 9;

/// Cubies in one layer of the puzzle.
pub type LayerCubies = SmallVec<[CubieId; CUBIES_PER_LAYER]>;

/// Index of a cubie in a [`Lattice`].
///
/// Cubie IDs are assigned at construction and never change, no matter where
/// the cubie moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(pub u8);
impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cubie #{}", self.0)
    }
}

/// Integer position of a cubie in the 3x3x3 grid, with each component in
/// `-1..=1`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeCoord(pub [i8; 3]);
impl LatticeCoord {
    /// Returns the component along `axis`.
    pub fn get(self, axis: Axis) -> i8 {
        self.0[axis.index()]
    }
    /// Returns the world-space position of the lattice point.
    pub fn world_position(self) -> Vector3<Float> {
        let [x, y, z] = self.0.map(|i| i as Float * SPACING);
        Vector3::new(x, y, z)
    }
    /// Returns the nearest lattice point to a world-space position.
    pub fn nearest(position: Vector3<Float>) -> Self {
        Self([position.x, position.y, position.z].map(|x| (x / SPACING).round() as i8))
    }
}
impl fmt::Display for LatticeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "({x}, {y}, {z})")
    }
}

/// Error selecting cubies from a [`Lattice`].
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// A layer did not contain exactly 9 cubies, which means a previous
    /// rotation was not committed.
    #[error("layer {layer:?} on axis {axis} has {count} cubies instead of 9")]
    WrongLayerSize {
        /// Rotation axis.
        axis: Axis,
        /// Layer along the axis.
        layer: Layer,
        /// Number of cubies found.
        count: usize,
    },
}

/// One of the 27 rigid pieces of the puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    /// Lattice coordinate when the puzzle was constructed.
    home: LatticeCoord,
    /// Color of each local face, indexed by [`Face::index()`].
    colors: [FaceColor; 6],
    /// World-space position of the center.
    position: Vector3<Float>,
    /// World-space orientation.
    rotation: Matrix3<Float>,
}
impl Cubie {
    /// Constructs a cubie in its solved position, coloring each outward face
    /// and leaving the rest as [`FaceColor::Core`].
    pub fn new(home: LatticeCoord) -> Self {
        let colors = std::array::from_fn(|i| {
            let face = Face::VARIANTS[i];
            if home.get(face.axis()) as Float == face.signum() {
                face.solved_color()
            } else {
                FaceColor::Core
            }
        });
        Self {
            home,
            colors,
            position: home.world_position(),
            rotation: Matrix3::identity(),
        }
    }

    /// Returns the lattice coordinate that the cubie was constructed at.
    pub fn home(&self) -> LatticeCoord {
        self.home
    }
    /// Returns the current lattice coordinate, rounded from the world
    /// position.
    pub fn coord(&self) -> LatticeCoord {
        LatticeCoord::nearest(self.position)
    }
    /// Returns the world-space position.
    pub fn position(&self) -> Vector3<Float> {
        self.position
    }
    /// Returns the world-space orientation as a rotation matrix.
    pub fn rotation(&self) -> Matrix3<Float> {
        self.rotation
    }
    /// Sets the world-space transform.
    pub fn set_transform(&mut self, position: Vector3<Float>, rotation: Matrix3<Float>) {
        self.position = position;
        self.rotation = rotation;
    }
    /// Applies a rotation around the puzzle center.
    pub fn rotate(&mut self, rot: Matrix3<Float>) {
        self.position = rot * self.position;
        self.rotation = rot * self.rotation;
    }

    /// Returns the orientation as XYZ Euler angles.
    ///
    /// When the Y angle is a quarter turn, the X angle absorbs the remaining
    /// rotation and the Z angle is zero.
    pub fn euler_angles(&self) -> [Rad<Float>; 3] {
        // `m[col][row]`
        let m = &self.rotation;
        let m13 = m[2][0];
        let y = m13.clamp(-1.0, 1.0).asin();
        let (x, z) = if m13.abs() < 0.9999999 {
            (Float::atan2(-m[2][1], m[2][2]), Float::atan2(-m[1][0], m[0][0]))
        } else {
            (Float::atan2(m[1][2], m[1][1]), 0.0)
        };
        [Rad(x), Rad(y), Rad(z)]
    }

    /// Rounds the position to the nearest lattice point and the orientation to
    /// the nearest multiple of a quarter turn around each axis.
    ///
    /// This must be called after every rotation to prevent floating-point
    /// error from accumulating.
    pub fn snap(&mut self) {
        self.position = self.coord().world_position();
        // Near a lattice orientation every entry of the rotation matrix is
        // close to -1, 0, or 1.
        let round = |v: Vector3<Float>| v.map(|x| x.round());
        self.rotation = Matrix3::from_cols(
            round(self.rotation.x),
            round(self.rotation.y),
            round(self.rotation.z),
        );
    }

    /// Returns the color of the local face that currently points along
    /// `direction`, or `None` if no face is within tolerance.
    pub fn color_facing(&self, direction: Vector3<Float>) -> Option<FaceColor> {
        Face::VARIANTS
            .iter()
            .find(|face| (self.rotation * face.normal()).dot(direction) > 0.9)
            .map(|face| self.colors[face.index()])
    }
    /// Returns the color of a local face.
    pub fn local_color(&self, face: Face) -> FaceColor {
        self.colors[face.index()]
    }
}

/// Grid of 27 cubies making up the puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    cubies: Vec<Cubie>,
}
impl Default for Lattice {
    fn default() -> Self {
        Self::new_solved()
    }
}
impl Lattice {
    /// Constructs a solved puzzle.
    pub fn new_solved() -> Self {
        let range = -1..=1;
        let cubies = itertools::iproduct!(range.clone(), range.clone(), range)
            .map(|(x, y, z)| Cubie::new(LatticeCoord([x, y, z])))
            .collect();
        Self { cubies }
    }

    /// Returns the number of cubies.
    pub fn len(&self) -> usize {
        self.cubies.len()
    }
    /// Returns whether there are no cubies.
    pub fn is_empty(&self) -> bool {
        self.cubies.is_empty()
    }
    /// Returns a cubie.
    pub fn get(&self, id: CubieId) -> Option<&Cubie> {
        self.cubies.get(id.0 as usize)
    }
    /// Returns a cubie.
    pub fn get_mut(&mut self, id: CubieId) -> Option<&mut Cubie> {
        self.cubies.get_mut(id.0 as usize)
    }
    /// Iterates over all cubies with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (CubieId, &Cubie)> {
        self.cubies
            .iter()
            .enumerate()
            .map(|(i, cubie)| (CubieId(i as u8), cubie))
    }

    /// Returns the cubies in a layer, selected by world position within half a
    /// spacing unit of the layer center.
    ///
    /// Returns an error if the layer does not contain exactly 9 cubies.
    pub fn cubies_in_layer(&self, axis: Axis, layer: Layer) -> Result<LayerCubies, LatticeError> {
        let center = layer.world_coordinate();
        let cubies: LayerCubies = self
            .iter()
            .filter(|(_, cubie)| (axis.component(cubie.position) - center).abs() < SPACING / 2.0)
            .map(|(id, _)| id)
            .collect();
        if cubies.len() == CUBIES_PER_LAYER {
            Ok(cubies)
        } else {
            Err(LatticeError::WrongLayerSize {
                axis,
                layer,
                count: cubies.len(),
            })
        }
    }

    /// Returns the cubies on an outer face, selected by distance from the
    /// puzzle center along the face normal.
    ///
    /// Unlike [`Self::cubies_in_layer()`], this does not validate the count.
    pub fn cubies_on_face(&self, face: Face) -> LayerCubies {
        let normal = face.normal();
        self.iter()
            .filter(|(_, cubie)| (cubie.position.dot(normal) - SPACING).abs() < 0.1)
            .map(|(id, _)| id)
            .collect()
    }

    /// Rotates a set of cubies around the puzzle center without snapping.
    pub fn rotate_cubies(&mut self, cubies: &[CubieId], rot: Matrix3<Float>) {
        for &id in cubies {
            if let Some(cubie) = self.get_mut(id) {
                cubie.rotate(rot);
            }
        }
    }
    /// Snaps a set of cubies to the lattice.
    pub fn snap_cubies(&mut self, cubies: &[CubieId]) {
        for &id in cubies {
            if let Some(cubie) = self.get_mut(id) {
                cubie.snap();
            }
        }
    }

    /// Applies a move instantly and snaps the result.
    ///
    /// If the layer does not contain exactly 9 cubies, the lattice is not
    /// modified.
    pub fn apply_move(&mut self, m: Move) -> Result<(), LatticeError> {
        let cubies = self.cubies_in_layer(m.axis, m.layer)?;
        self.rotate_cubies(&cubies, m.rotation());
        self.snap_cubies(&cubies);
        Ok(())
    }
    /// Applies a sequence of moves instantly, stopping at the first error.
    pub fn apply_moves(&mut self, moves: impl IntoIterator<Item = Move>) -> Result<(), LatticeError> {
        moves.into_iter().try_for_each(|m| self.apply_move(m))
    }

    /// Returns the 3x3 grid of colors visible on a face, as rows from top to
    /// bottom when looking at the face from outside with the usual
    /// orientation of a cube net.
    ///
    /// Positions without a cubie (which only happens mid-rotation) are `None`.
    pub fn face_colors(&self, face: Face) -> [[Option<FaceColor>; 3]; 3] {
        let normal = face.normal();
        // Screen-right and screen-up directions for each face in a cube net.
        let (right, up) = match face {
            Face::R => (-Axis::Z.unit_vector(), Axis::Y.unit_vector()),
            Face::L => (Axis::Z.unit_vector(), Axis::Y.unit_vector()),
            Face::U => (Axis::X.unit_vector(), -Axis::Z.unit_vector()),
            Face::D => (Axis::X.unit_vector(), Axis::Z.unit_vector()),
            Face::F => (Axis::X.unit_vector(), Axis::Y.unit_vector()),
            Face::B => (-Axis::X.unit_vector(), Axis::Y.unit_vector()),
        };
        let on_face = self.cubies_on_face(face);
        let mut grid = [[None; 3]; 3];
        for cubie in on_face.iter().filter_map(|&id| self.get(id)) {
            let col = (cubie.position.dot(right) / SPACING).round() as i8 + 1;
            let row = 1 - (cubie.position.dot(up) / SPACING).round() as i8;
            if let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col))
                && row < 3
                && col < 3
            {
                grid[row][col] = cubie.color_facing(normal);
            }
        }
        grid
    }

    /// Returns a multi-line cube net showing every face.
    pub fn net_string(&self) -> String {
        let grid = |face| self.face_colors(face);
        let row_string = |g: &[[Option<FaceColor>; 3]; 3], r: usize| -> String {
            g[r].iter()
                .map(|c| c.map_or('?', FaceColor::symbol))
                .collect()
        };
        let (u, l, f, r, b, d) = (
            grid(Face::U),
            grid(Face::L),
            grid(Face::F),
            grid(Face::R),
            grid(Face::B),
            grid(Face::D),
        );
        let mut lines = vec![];
        lines.extend((0..3).map(|i| format!("    {}", row_string(&u, i))));
        lines.extend((0..3).map(|i| {
            [&l, &f, &r, &b]
                .into_iter()
                .map(|g| row_string(g, i))
                .join(" ")
        }));
        lines.extend((0..3).map(|i| format!("    {}", row_string(&d, i))));
        lines.join("\n")
    }
}
