//! Frame pacing
//!
//! Frames start no closer together than the frame budget. The event loop
//! sleeps until [`FramePacer::next_frame_at`] instead of spinning. Redraws
//! that arrive early (resizes, expose events) repaint without starting a
//! new frame.

use std::time::{Duration, Instant};

/// Tracks when the current frame started and when the next may start
pub struct FramePacer {
    budget: Duration,
    frame_start: Instant,
    frames: u64,
}

impl FramePacer {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            frame_start: Instant::now(),
            frames: 0,
        }
    }

    /// Start a new frame at `now` if the budget allows it
    ///
    /// Returns `false` for a redraw inside the current frame's budget; the
    /// scene should then be repainted without advancing.
    pub fn try_begin_frame(&mut self, now: Instant) -> bool {
        if self.frames > 0 && !self.is_due(now) {
            return false;
        }
        self.begin_frame_at(now);
        true
    }

    fn begin_frame_at(&mut self, now: Instant) {
        self.frame_start = now;
        self.frames += 1;
    }

    /// Earliest instant the next frame may start
    pub fn next_frame_at(&self) -> Instant {
        self.frame_start + self.budget
    }

    /// Whether the budget of the current frame has elapsed at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame_at()
    }

    /// Number of frames started so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGET: Duration = Duration::from_millis(10);

    #[test]
    fn test_first_frame_starts_immediately() {
        let mut pacer = FramePacer::new(BUDGET);
        let now = Instant::now();
        assert!(pacer.try_begin_frame(now));
        assert_eq!(pacer.frame_count(), 1);
        assert_eq!(pacer.next_frame_at(), now + BUDGET);
    }

    #[test]
    fn test_early_redraw_does_not_start_frame() {
        let mut pacer = FramePacer::new(BUDGET);
        let start = Instant::now();
        assert!(pacer.try_begin_frame(start));

        // e.g. a resize in the middle of the budget
        assert!(!pacer.try_begin_frame(start + Duration::from_millis(3)));
        assert!(!pacer.try_begin_frame(start + Duration::from_millis(9)));
        assert_eq!(pacer.frame_count(), 1);
        assert_eq!(pacer.next_frame_at(), start + BUDGET);
    }

    #[test]
    fn test_frame_starts_once_budget_elapsed() {
        let mut pacer = FramePacer::new(BUDGET);
        let start = Instant::now();
        assert!(pacer.try_begin_frame(start));
        assert!(pacer.try_begin_frame(start + BUDGET));
        assert_eq!(pacer.frame_count(), 2);
        assert_eq!(pacer.next_frame_at(), start + BUDGET * 2);
    }

    #[test]
    fn test_is_due() {
        let mut pacer = FramePacer::new(BUDGET);
        let start = Instant::now();
        pacer.try_begin_frame(start);
        assert!(!pacer.is_due(start + Duration::from_millis(5)));
        assert!(pacer.is_due(start + Duration::from_millis(10)));
        assert!(pacer.is_due(start + Duration::from_millis(25)));
    }

    #[test]
    fn test_zero_budget_is_always_due() {
        let mut pacer = FramePacer::new(Duration::ZERO);
        let start = Instant::now();
        assert!(pacer.try_begin_frame(start));
        assert!(pacer.try_begin_frame(start));
        assert_eq!(pacer.frame_count(), 2);
    }
}
