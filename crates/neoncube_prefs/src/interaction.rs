use serde::{Deserialize, Serialize};

/// How drag gestures are interpreted.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, strum::VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleMode {
    /// Dragging orbits the camera around the puzzle.
    #[default]
    View,
    /// Dragging a face turns a layer; the camera stays fixed.
    Fixed,
}

/// Mouse and touch input preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Mode when the puzzle is first shown.
    pub initial_mode: PuzzleMode,
    /// Number of pixels the pointer must move along either screen axis before
    /// a drag turns a layer.
    pub drag_threshold: f32,
    /// Minimum alignment (cosine) between the drag direction and the on-screen
    /// motion of the best rotation axis. Ambiguous drags below this are
    /// ignored.
    pub min_drag_alignment: f32,
}
impl Default for InteractionPreferences {
    fn default() -> Self {
        Self {
            initial_mode: PuzzleMode::View,
            drag_threshold: 10.0,
            min_drag_alignment: 0.5,
        }
    }
}
