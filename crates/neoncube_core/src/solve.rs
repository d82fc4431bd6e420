use strum::VariantArray;

use crate::{Face, FaceColor, Lattice};

/// Result of checking whether the puzzle is solved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Every face shows a single non-core color.
    Solved,
    /// At least one face shows more than one color, or shows a core face.
    Unsolved,
    /// Some face does not have exactly 9 cubies on it, which only happens in
    /// the middle of a rotation. This is not a failure; check again later.
    Unsettled,
}
impl SolveStatus {
    /// Returns whether the status is [`SolveStatus::Solved`].
    pub fn is_solved(self) -> bool {
        self == SolveStatus::Solved
    }
}

impl Lattice {
    /// Checks whether each face shows a single uniform color.
    pub fn solve_status(&self) -> SolveStatus {
        for &face in Face::VARIANTS {
            let cubies = self.cubies_on_face(face);
            if cubies.len() != 9 {
                return SolveStatus::Unsettled;
            }

            let normal = face.normal();
            let mut colors = cubies
                .iter()
                .map(|&id| self.get(id).and_then(|cubie| cubie.color_facing(normal)));
            let reference = colors.next().flatten();
            if matches!(reference, None | Some(FaceColor::Core)) {
                return SolveStatus::Unsolved;
            }
            if colors.any(|color| color != reference) {
                return SolveStatus::Unsolved;
            }
        }
        SolveStatus::Solved
    }

    /// Returns whether the puzzle is solved.
    pub fn is_solved(&self) -> bool {
        self.solve_status().is_solved()
    }
}
