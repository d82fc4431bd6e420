use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

/// Animation preferences. Durations are in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Duration of a user move or undo.
    pub twist_duration: f32,
    /// Duration of each move in a shuffle.
    pub shuffle_twist_duration: f32,
    /// Easing curve for layer rotations.
    pub twist_interpolation: InterpolateFn,
    /// Duration of the celebration effect when the puzzle is solved.
    pub celebration_duration: f32,
    /// How long the "solved" message stays after the celebration effect ends.
    pub message_linger_duration: f32,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_duration: 0.3,
            shuffle_twist_duration: 0.1,
            twist_interpolation: InterpolateFn::CubicOut,
            celebration_duration: 3.0,
            message_linger_duration: 2.0,
        }
    }
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f32::consts::PI;

    use serde::{Deserialize, Serialize};

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0.
    #[derive(
        Serialize,
        Deserialize,
        Debug,
        Default,
        Copy,
        Clone,
        PartialEq,
        Eq,
        Hash,
        strum::VariantArray,
    )]
    #[serde(rename_all = "snake_case")]
    pub enum InterpolateFn {
        /// Constant speed.
        Lerp,
        /// Half of a cosine wave.
        Cosine,
        /// Smoothstep.
        Cubic,
        /// Fast start, slow finish.
        #[default]
        CubicOut,
        /// Slightly past the end, then back.
        Overshoot,
        /// Exponential approach.
        CriticallyDamped,
    }

    impl InterpolateFn {
        /// Returns the interpolation value for `t` in the range [0, 1].
        ///
        /// `t` is clamped first. Every function maps 0 to 0 and 1 to 1.
        pub fn interpolate(self, t: f32) -> f32 {
            let t = t.clamp(0.0, 1.0);
            match self {
                Self::Lerp => t,

                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

                Self::Cubic => (3.0 - 2.0 * t) * t * t,

                // https://easings.net/#easeOutCubic
                Self::CubicOut => 1.0 - (1.0 - t).powi(3),

                Self::Overshoot => {
                    // https://easings.net/#easeOutBack
                    let c1 = 1.70158;
                    let c3 = c1 + 1.0;
                    1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
                }
                Self::CriticallyDamped => {
                    if t >= 1.0 {
                        1.0
                    } else {
                        (-5.0 * t - 1.0) * (-8.0 * t).exp() + 1.0
                    }
                }
            }
        }
    }

}
