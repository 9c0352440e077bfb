//! Fire-and-forget geometry transitions.
//!
//! A transition is started and never awaited. Starting a new transition while
//! one is running re-targets from whatever geometry is presented at that
//! moment; nothing is queued.

use std::time::Instant;

use crate::models::{Animation, LayoutFrames};

/// An in-flight (or finished) interpolation between two layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryTransition {
    from: LayoutFrames,
    to: LayoutFrames,
    animation: Animation,
    started: Instant,
}

impl GeometryTransition {
    /// Starts a transition at `now`.
    #[must_use]
    pub const fn start(
        from: LayoutFrames,
        to: LayoutFrames,
        animation: Animation,
        now: Instant,
    ) -> Self {
        Self {
            from,
            to,
            animation,
            started: now,
        }
    }

    /// Linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        let total = self.animation.duration.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        (elapsed / total).clamp(0.0, 1.0)
    }

    /// Presented frames at `now`.
    #[must_use]
    pub fn frames_at(&self, now: Instant) -> LayoutFrames {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, self.animation.curve.apply(progress))
    }

    /// Whether the target has been reached.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnimationCurve, Rect};
    use std::time::Duration;

    fn frames(page_height: f64) -> LayoutFrames {
        LayoutFrames {
            page: Rect::new(0.0, 0.0, 100.0, page_height),
            command_bar: Rect::new(0.0, page_height, 100.0, 10.0),
        }
    }

    fn linear(ms: u64) -> Animation {
        Animation {
            duration: Duration::from_millis(ms),
            curve: AnimationCurve::Linear,
        }
    }

    #[test]
    fn test_progress_over_time() {
        let t0 = Instant::now();
        let transition = GeometryTransition::start(frames(100.0), frames(50.0), linear(200), t0);

        assert_eq!(transition.frames_at(t0), frames(100.0));
        let mid = transition.frames_at(t0 + Duration::from_millis(100));
        assert!((mid.page.height - 75.0).abs() < 1e-9);
        assert!(!transition.is_finished(t0 + Duration::from_millis(100)));

        let end = t0 + Duration::from_millis(500);
        assert_eq!(transition.frames_at(end), frames(50.0));
        assert!(transition.is_finished(end));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let t0 = Instant::now();
        let transition = GeometryTransition::start(frames(100.0), frames(50.0), linear(0), t0);
        assert!(transition.is_finished(t0));
        assert_eq!(transition.frames_at(t0), frames(50.0));
    }
}
