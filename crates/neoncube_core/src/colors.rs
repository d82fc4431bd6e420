use std::fmt;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{Axis, Float};

/// Outward face of the puzzle, which is also used for the local faces of a
/// cubie.
///
/// Variants are ordered `+X, -X, +Y, -Y, +Z, -Z`.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, VariantArray,
)]
pub enum Face {
    /// Right (+X).
    R,
    /// Left (-X).
    L,
    /// Up (+Y).
    U,
    /// Down (-Y).
    D,
    /// Front (+Z).
    F,
    /// Back (-Z).
    B,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
impl Face {
    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }
    /// Returns `1.0` if the face is on the positive side of its axis and
    /// `-1.0` otherwise.
    pub fn signum(self) -> Float {
        match self {
            Face::R | Face::U | Face::F => 1.0,
            Face::L | Face::D | Face::B => -1.0,
        }
    }
    /// Returns the outward unit normal of the face.
    pub fn normal(self) -> Vector3<Float> {
        self.axis().unit_vector() * self.signum()
    }
    /// Returns the index of the face in `[Face; 6]` arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the color of the face on a solved puzzle.
    pub fn solved_color(self) -> FaceColor {
        match self {
            Face::R => FaceColor::Blue,
            Face::L => FaceColor::Green,
            Face::U => FaceColor::White,
            Face::D => FaceColor::Yellow,
            Face::F => FaceColor::Red,
            Face::B => FaceColor::Orange,
        }
    }
}

/// Color of one face of a cubie.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum FaceColor {
    /// Right face.
    Blue,
    /// Left face.
    Green,
    /// Up face.
    White,
    /// Down face.
    Yellow,
    /// Front face.
    Red,
    /// Back face.
    Orange,
    /// Interior faces, which are never visible on a solved puzzle.
    Core,
}
impl FaceColor {
    /// Returns the display color.
    pub fn rgb(self) -> Rgb {
        match self {
            FaceColor::Blue => Rgb::from_hex(0x0000FF),
            FaceColor::Green => Rgb::from_hex(0x00FF00),
            FaceColor::White => Rgb::from_hex(0xFFFFFF),
            FaceColor::Yellow => Rgb::from_hex(0xFFFF00),
            FaceColor::Red => Rgb::from_hex(0xFF0000),
            FaceColor::Orange => Rgb::from_hex(0xFFA500),
            FaceColor::Core => Rgb::from_hex(0x222222),
        }
    }
    /// Returns a single-character abbreviation for text output.
    pub fn symbol(self) -> char {
        match self {
            FaceColor::Blue => 'B',
            FaceColor::Green => 'G',
            FaceColor::White => 'W',
            FaceColor::Yellow => 'Y',
            FaceColor::Red => 'R',
            FaceColor::Orange => 'O',
            FaceColor::Core => '.',
        }
    }
}

/// RGB color with 8 bits per channel.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red, green, and blue components.
    pub rgb: [u8; 3],
}
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
impl Rgb {
    /// Constructs a color from a `0xRRGGBB` integer.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            rgb: [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8],
        }
    }
    /// Returns the color as a `0xRRGGBB` integer.
    pub const fn to_hex(self) -> u32 {
        let [r, g, b] = self.rgb;
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;

    #[test]
    fn test_face_normals() {
        for &face in Face::VARIANTS {
            assert_eq!(face.normal().magnitude2(), 1.0);
            assert_eq!(face.normal()[face.axis().index()], face.signum());
        }
        assert_eq!(Face::D.normal(), Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(FaceColor::Orange.rgb().to_hex(), 0xFFA500);
        assert_eq!(FaceColor::Core.rgb().to_string(), "#222222");
    }
}
