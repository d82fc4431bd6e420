use cgmath::{Matrix3, Rad, Vector3};
use neoncube_core::prelude::*;
use neoncube_prefs::InterpolateFn;
use smallvec::SmallVec;
use web_time::{Duration, Instant};

/// What to do after a twist animation completes.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Nothing.
    #[default]
    None,
    /// Start the next move of the shuffle in progress.
    Shuffle,
}

/// Animation of a single layer through a quarter turn.
///
/// The transforms of the layer's cubies are recorded when the animation
/// starts, and every frame sets each cubie's transform to the current partial
/// rotation applied to its recorded transform.
#[derive(Debug, Clone)]
pub struct TwistAnimation {
    /// Move being animated.
    pub twist: Move,
    /// Cubies in the layer, with their transforms when the animation started.
    cubies: SmallVec<[(CubieId, Vector3<Float>, Matrix3<Float>); 9]>,
    /// Time when the animation started.
    start: Instant,
    /// Total duration.
    duration: Duration,
    /// Action to run after completion.
    pub continuation: Continuation,
}
impl TwistAnimation {
    /// Selects the layer for `twist` and records the transforms of its
    /// cubies.
    ///
    /// Returns an error if the layer does not contain exactly 9 cubies, in
    /// which case no animation should be started.
    pub fn new(
        lattice: &Lattice,
        twist: Move,
        start: Instant,
        duration: Duration,
        continuation: Continuation,
    ) -> Result<Self, LatticeError> {
        let cubies = lattice
            .cubies_in_layer(twist.axis, twist.layer)?
            .into_iter()
            .filter_map(|id| {
                let cubie = lattice.get(id)?;
                Some((id, cubie.position(), cubie.rotation()))
            })
            .collect();
        Ok(Self {
            twist,
            cubies,
            start,
            duration,
            continuation,
        })
    }

    /// Returns the IDs of the cubies being rotated.
    pub fn cubies(&self) -> impl Iterator<Item = CubieId> + '_ {
        self.cubies.iter().map(|&(id, _, _)| id)
    }
    /// Returns the total duration of the animation.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the linear progress of the animation at time `now`, from 0.0
    /// to 1.0.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
    /// Returns the rotation angle at time `now`.
    pub fn angle(&self, now: Instant, interpolation: InterpolateFn) -> Rad<Float> {
        let t = interpolation.interpolate(self.progress(now));
        self.twist.angle() * t as Float
    }

    /// Sets the transform of each cubie in the layer to its starting transform
    /// rotated by `angle`.
    pub fn apply(&self, lattice: &mut Lattice, angle: Rad<Float>) {
        self.apply_rotation(lattice, self.twist.axis.rotation(angle));
    }
    /// Sets the transform of each cubie in the layer to its starting transform
    /// rotated through the whole move, and then snaps them to the lattice.
    pub fn finish(&self, lattice: &mut Lattice) {
        self.apply_rotation(lattice, self.twist.rotation());
        lattice.snap_cubies(&self.cubies().collect::<LayerCubies>());
    }

    fn apply_rotation(&self, lattice: &mut Lattice, rot: Matrix3<Float>) {
        for &(id, position, rotation) in &self.cubies {
            if let Some(cubie) = lattice.get_mut(id) {
                cubie.set_transform(rot * position, rot * rotation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn test_twist_animation_matches_instant_move() {
        let t0 = Instant::now();
        let duration = Duration::from_millis(300);

        for m in Move::all() {
            let mut animated = Lattice::new_solved();
            let anim = TwistAnimation::new(&animated, m, t0, duration, Continuation::None).unwrap();
            assert_eq!(anim.cubies().count(), 9);

            for ms in [0, 75, 150, 299] {
                let angle = anim.angle(t0 + Duration::from_millis(ms), InterpolateFn::CubicOut);
                assert!(angle.0.abs() < FRAC_PI_2);
                anim.apply(&mut animated, angle);
            }
            anim.finish(&mut animated);

            let mut instant = Lattice::new_solved();
            instant.apply_move(m).unwrap();
            assert_eq!(animated, instant, "{m}");
        }
    }

    #[test]
    fn test_twist_progress() {
        let t0 = Instant::now();
        let m = "z-1'".parse().unwrap();
        let anim = TwistAnimation::new(
            &Lattice::new_solved(),
            m,
            t0,
            Duration::from_millis(100),
            Continuation::Shuffle,
        )
        .unwrap();

        assert_eq!(anim.progress(t0), 0.0);
        assert!((anim.progress(t0 + Duration::from_millis(50)) - 0.5).abs() < 1e-6);
        assert_eq!(anim.progress(t0 + Duration::from_millis(250)), 1.0);
        let half = anim.angle(t0 + Duration::from_millis(50), InterpolateFn::CubicOut);
        assert!((half.0 - -FRAC_PI_2 * 0.875).abs() < 1e-6);
    }
}
