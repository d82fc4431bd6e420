use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use cgmath::{Matrix3, Rad, Vector3};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{Float, SPACING};

/// Rotation axis of the puzzle.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Axis pointing toward the right face.
    X,
    /// Axis pointing toward the up face.
    Y,
    /// Axis pointing toward the front face.
    Z,
}
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl Axis {
    /// Returns the lowercase name of the axis.
    pub fn name(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
    /// Returns the axis with the given (case-insensitive) name.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the index of the axis in a vector.
    pub fn index(self) -> usize {
        self as usize
    }
    /// Returns the unit vector along the axis.
    pub fn unit_vector(self) -> Vector3<Float> {
        let mut v = Vector3::new(0.0, 0.0, 0.0);
        v[self.index()] = 1.0;
        v
    }
    /// Returns the component of `v` along the axis.
    pub fn component(self, v: Vector3<Float>) -> Float {
        v[self.index()]
    }
    /// Returns the matrix for a right-handed rotation by `angle` around the
    /// axis.
    pub fn rotation(self, angle: Rad<Float>) -> Matrix3<Float> {
        match self {
            Axis::X => Matrix3::from_angle_x(angle),
            Axis::Y => Matrix3::from_angle_y(angle),
            Axis::Z => Matrix3::from_angle_z(angle),
        }
    }
}

/// Slice of the puzzle perpendicular to an axis.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Layer at coordinate `-1`.
    Negative = -1,
    /// Middle layer, at coordinate `0`.
    Middle = 0,
    /// Layer at coordinate `1`.
    Positive = 1,
}
impl Layer {
    /// Returns the lattice coordinate of the layer.
    pub fn index(self) -> i8 {
        self as i8
    }
    /// Returns the layer at the given lattice coordinate, or `None` if it is
    /// outside the puzzle.
    pub fn from_index(i: i8) -> Option<Self> {
        match i {
            -1 => Some(Layer::Negative),
            0 => Some(Layer::Middle),
            1 => Some(Layer::Positive),
            _ => None,
        }
    }
    /// Returns the layer containing the world coordinate `x`, rounding to the
    /// nearest lattice position.
    pub fn from_world_coordinate(x: Float) -> Option<Self> {
        let i = (x / SPACING).round();
        if (-1.0..=1.0).contains(&i) {
            Self::from_index(i as i8)
        } else {
            None
        }
    }
    /// Returns the world coordinate of the center of the layer.
    pub fn world_coordinate(self) -> Float {
        self.index() as Float * SPACING
    }
}

/// Direction of a quarter turn, using the right-hand rule around the axis.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Counterclockwise when viewed from the positive end of the axis.
    Positive,
    /// Clockwise when viewed from the positive end of the axis.
    Negative,
}
impl Direction {
    /// Returns `1.0` or `-1.0`.
    pub fn signum(self) -> Float {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
    /// Returns the direction with the same sign as `x`, or `None` if `x` is
    /// zero or NaN.
    pub fn from_signum(x: Float) -> Option<Self> {
        if x > 0.0 {
            Some(Direction::Positive)
        } else if x < 0.0 {
            Some(Direction::Negative)
        } else {
            None
        }
    }
    /// Returns the opposite direction.
    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// Quarter turn of one layer around one axis.
///
/// Written as `<axis><layer>` with a trailing `'` for the negative direction,
/// such as `x1`, `y-1'`, or `z0`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Rotation axis.
    pub axis: Axis,
    /// Layer to rotate.
    pub layer: Layer,
    /// Turn direction.
    pub direction: Direction,
}
impl Move {
    /// Constructs a move.
    pub fn new(axis: Axis, layer: Layer, direction: Direction) -> Self {
        Self {
            axis,
            layer,
            direction,
        }
    }

    /// Returns all 18 legal quarter turns.
    pub fn all() -> impl Iterator<Item = Move> {
        itertools::iproduct!(Axis::VARIANTS, Layer::VARIANTS, Direction::VARIANTS)
            .map(|(&axis, &layer, &direction)| Move::new(axis, layer, direction))
    }

    /// Returns the signed rotation angle: a quarter turn in radians.
    pub fn angle(self) -> Rad<Float> {
        Rad(self.direction.signum() * FRAC_PI_2)
    }
    /// Returns the rotation matrix for the full move.
    pub fn rotation(self) -> Matrix3<Float> {
        self.axis.rotation(self.angle())
    }
    /// Returns the inverse move, which has the same axis and layer but the
    /// negated angle.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            direction: self.direction.rev(),
            ..self
        }
    }

    /// Parses a whitespace-separated move sequence.
    pub fn parse_sequence(s: &str) -> Result<Vec<Move>, ParseMoveError> {
        s.split_whitespace().map(str::parse).collect()
    }
    /// Formats a move sequence, separating moves with spaces.
    pub fn format_sequence(moves: impl IntoIterator<Item = Move>) -> String {
        moves.into_iter().join(" ")
    }
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis, self.layer.index())?;
        if self.direction == Direction::Negative {
            write!(f, "'")?;
        }
        Ok(())
    }
}
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let axis_char = chars.next().ok_or(ParseMoveError::Empty)?;
        let axis = Axis::from_char(axis_char).ok_or(ParseMoveError::UnknownAxis(axis_char))?;

        let rest = chars.as_str();
        let (layer_str, direction) = match rest.strip_suffix('\'') {
            Some(layer_str) => (layer_str, Direction::Negative),
            None => (rest, Direction::Positive),
        };
        let layer = layer_str
            .parse::<i8>()
            .ok()
            .and_then(Layer::from_index)
            .ok_or_else(|| ParseMoveError::InvalidLayer(s.to_string()))?;

        Ok(Move::new(axis, layer, direction))
    }
}

/// Error encountered while parsing a [`Move`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    /// The move string was empty.
    #[error("empty move")]
    Empty,
    /// The first character is not `x`, `y`, or `z`.
    #[error("unknown axis {0:?}")]
    UnknownAxis(char),
    /// The layer is missing or outside `-1..=1`.
    #[error("invalid layer in move {0:?}")]
    InvalidLayer(String),
}
