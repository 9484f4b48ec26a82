//! Frame loop state machine
//!
//! Input handling and animation are pure transitions on small `Copy`
//! values so the loop can be driven without a window:
//!
//! - `(SceneState, SceneEvent) -> SceneState` for input
//! - `(SceneState, frames) -> SceneState` for animation
//! - `(LoopState, SceneEvent) -> LoopState` for shutdown

use serde::{Deserialize, Serialize};

/// Semantic input events understood by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// Speed up the primary rotation by one degree per frame
    IncreaseSpeed,
    /// Slow down the primary rotation by one degree per frame
    DecreaseSpeed,
    /// The window was asked to close
    CloseRequested,
}

/// Rotation state of the scene
///
/// Angles and speeds are whole degrees. Angles accumulate without
/// wraparound; they are only reduced when converted to radians for a
/// transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneState {
    /// Rotation about the camera's primary axis, in degrees
    pub primary_angle: i64,
    /// Degrees added to `primary_angle` each frame (user adjustable)
    pub primary_speed: i64,
    /// Rotation about the Z axis, in degrees
    pub secondary_angle: i64,
    /// Degrees added to `secondary_angle` each frame
    pub secondary_speed: i64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(1, 2)
    }
}

impl SceneState {
    /// Create a state with both angles at zero
    pub fn new(primary_speed: i64, secondary_speed: i64) -> Self {
        Self {
            primary_angle: 0,
            primary_speed,
            secondary_angle: 0,
            secondary_speed,
        }
    }

    /// Apply an input event
    ///
    /// Speed changes are not clamped. Events that do not affect the
    /// rotation leave the state unchanged.
    #[must_use]
    pub fn handle_event(self, event: SceneEvent) -> Self {
        match event {
            SceneEvent::IncreaseSpeed => {
                let primary_speed = self.primary_speed.wrapping_add(1);
                log::debug!("Rotation speed: {}", primary_speed);
                Self { primary_speed, ..self }
            }
            SceneEvent::DecreaseSpeed => {
                let primary_speed = self.primary_speed.wrapping_sub(1);
                log::debug!("Rotation speed: {}", primary_speed);
                Self { primary_speed, ..self }
            }
            SceneEvent::CloseRequested => self,
        }
    }

    /// Advance both angles by `frames` steps at their current speeds
    #[must_use]
    pub fn advance(self, frames: u32) -> Self {
        let n = i64::from(frames);
        Self {
            primary_angle: self.primary_angle.wrapping_add(self.primary_speed.wrapping_mul(n)),
            secondary_angle: self.secondary_angle.wrapping_add(self.secondary_speed.wrapping_mul(n)),
            ..self
        }
    }

    /// Primary rotation in radians, reduced to [0, 2pi)
    pub fn primary_rotation_radians(&self) -> f32 {
        degrees_to_radians(self.primary_angle)
    }

    /// Secondary (Z axis) rotation in radians, reduced to [0, 2pi)
    pub fn secondary_rotation_radians(&self) -> f32 {
        degrees_to_radians(self.secondary_angle)
    }
}

// Reducing in integer space keeps large accumulated angles exact
fn degrees_to_radians(degrees: i64) -> f32 {
    (degrees.rem_euclid(360) as f32).to_radians()
}

/// Frame loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    /// Terminal: the loop stops after the current iteration
    Exiting,
}

impl LoopState {
    #[must_use]
    pub fn handle_event(self, event: SceneEvent) -> Self {
        match (self, event) {
            (LoopState::Running, SceneEvent::CloseRequested) => LoopState::Exiting,
            (state, _) => state,
        }
    }

    pub fn is_running(&self) -> bool {
        *self == LoopState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_speeds() {
        let state = SceneState::default();
        assert_eq!(state.primary_angle, 0);
        assert_eq!(state.primary_speed, 1);
        assert_eq!(state.secondary_angle, 0);
        assert_eq!(state.secondary_speed, 2);
    }

    #[test]
    fn test_increase_adds_one() {
        for start in [-5, 0, 1, 100] {
            let state = SceneState::new(start, 2).handle_event(SceneEvent::IncreaseSpeed);
            assert_eq!(state.primary_speed, start + 1);
        }
    }

    #[test]
    fn test_decrease_goes_negative() {
        let state = SceneState::new(0, 2)
            .handle_event(SceneEvent::DecreaseSpeed)
            .handle_event(SceneEvent::DecreaseSpeed);
        assert_eq!(state.primary_speed, -2);
    }

    #[test]
    fn test_speed_events_leave_secondary_alone() {
        let state = SceneState::default().handle_event(SceneEvent::IncreaseSpeed);
        assert_eq!(state.secondary_speed, 2);
        assert_eq!(state.primary_angle, 0);
    }

    #[test]
    fn test_close_does_not_change_rotation() {
        let state = SceneState::default();
        assert_eq!(state.handle_event(SceneEvent::CloseRequested), state);
    }

    #[test]
    fn test_advance_accumulates() {
        let state = SceneState::new(3, 2).advance(1).advance(1);
        assert_eq!(state.primary_angle, 6);
        assert_eq!(state.secondary_angle, 4);
    }

    #[test]
    fn test_advance_is_linear() {
        let a = SceneState::new(7, -4).advance(10);
        let mut b = SceneState::new(7, -4);
        for _ in 0..10 {
            b = b.advance(1);
        }
        assert_eq!(a, b);
        assert_eq!(a.primary_angle, 70);
        assert_eq!(a.secondary_angle, -40);
    }

    #[test]
    fn test_angles_are_not_normalized() {
        let state = SceneState::new(100, 2).advance(10);
        assert_eq!(state.primary_angle, 1000);
    }

    #[test]
    fn test_radians_reduced_modulo_full_turn() {
        let mut state = SceneState::default();
        state.primary_angle = 370;
        state.secondary_angle = -90;
        assert!((state.primary_rotation_radians() - 10f32.to_radians()).abs() < 1e-6);
        assert!((state.secondary_rotation_radians() - 270f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_loop_state_close() {
        let state = LoopState::default();
        assert!(state.is_running());
        assert_eq!(state.handle_event(SceneEvent::IncreaseSpeed), LoopState::Running);
        assert_eq!(state.handle_event(SceneEvent::CloseRequested), LoopState::Exiting);
    }

    #[test]
    fn test_exiting_is_terminal() {
        let state = LoopState::Exiting;
        for event in [SceneEvent::IncreaseSpeed, SceneEvent::DecreaseSpeed, SceneEvent::CloseRequested] {
            assert_eq!(state.handle_event(event), LoopState::Exiting);
        }
    }
}
