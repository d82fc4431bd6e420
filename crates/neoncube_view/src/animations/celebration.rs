use neoncube_prefs::AnimationPreferences;
use web_time::Instant;

/// State of the effect shown when the puzzle is solved.
///
/// The effect plays for `celebration_duration`, and then the "solved" message
/// stays visible for another `message_linger_duration`.
#[derive(Debug, Default, Clone)]
pub struct CelebrationState {
    start: Option<Instant>,
}
impl CelebrationState {
    /// Starts the celebration, restarting it if it is already running.
    pub fn start(&mut self, now: Instant) {
        self.start = Some(now);
    }
    /// Stops the celebration and hides the message.
    pub fn hide(&mut self) {
        self.start = None;
    }

    /// Steps the animation forward. Returns whether the puzzle should be
    /// redrawn next frame.
    pub fn proceed(&mut self, now: Instant, prefs: &AnimationPreferences) -> bool {
        let needs_redraw = self.message_visible(now, prefs);
        if !needs_redraw {
            self.hide();
        }
        needs_redraw
    }

    /// Returns the progress of the celebration effect from 0.0 to 1.0, or
    /// `None` if it is not playing.
    pub fn progress(&self, now: Instant, prefs: &AnimationPreferences) -> Option<f32> {
        let elapsed = now.saturating_duration_since(self.start?).as_secs_f32();
        if prefs.celebration_duration <= 0.0 {
            return None;
        }
        let t = elapsed / prefs.celebration_duration;
        (t < 1.0).then_some(t)
    }
    /// Returns whether the "solved" message should be shown.
    pub fn message_visible(&self, now: Instant, prefs: &AnimationPreferences) -> bool {
        self.start.is_some_and(|start| {
            let elapsed = now.saturating_duration_since(start).as_secs_f32();
            elapsed < prefs.celebration_duration + prefs.message_linger_duration
        })
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    #[test]
    fn test_celebration_timing() {
        let prefs = AnimationPreferences::default();
        let t0 = Instant::now();
        let at = |secs: f32| t0 + Duration::from_secs_f32(secs);

        let mut state = CelebrationState::default();
        assert!(!state.proceed(t0, &prefs));

        state.start(t0);
        assert_eq!(state.progress(at(1.5), &prefs), Some(0.5));
        assert!(state.message_visible(at(2.9), &prefs));

        // Confetti is done but the message lingers.
        assert_eq!(state.progress(at(3.5), &prefs), None);
        assert!(state.proceed(at(4.9), &prefs));

        assert!(!state.proceed(at(5.1), &prefs));
        assert!(!state.message_visible(at(4.0), &prefs));
    }

    #[test]
    fn test_hide() {
        let prefs = AnimationPreferences::default();
        let t0 = Instant::now();
        let mut state = CelebrationState::default();
        state.start(t0);
        state.hide();
        assert!(!state.message_visible(t0, &prefs));
        assert_eq!(state.progress(t0, &prefs), None);
    }
}
