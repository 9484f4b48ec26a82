//! Integration tests for the frame loop state machine
//!
//! These drive `SceneState` and `LoopState` through the same sequence the
//! window loop uses: drain events, then advance one frame.

use shadowcube_core::{LoopState, SceneEvent, SceneState};

/// One loop iteration: apply queued events, then advance one frame
fn run_frame(state: SceneState, loop_state: LoopState, events: &[SceneEvent]) -> (SceneState, LoopState) {
    let mut state = state;
    let mut loop_state = loop_state;
    for &event in events {
        state = state.handle_event(event);
        loop_state = loop_state.handle_event(event);
    }
    (state.advance(1), loop_state)
}

#[test]
fn test_up_then_three_frames() {
    let initial = SceneState::default();
    assert_eq!(initial.primary_speed, 1);

    let (mut state, mut loop_state) = run_frame(initial, LoopState::Running, &[SceneEvent::IncreaseSpeed]);
    for _ in 0..2 {
        (state, loop_state) = run_frame(state, loop_state, &[]);
    }

    // Speed became 2 before the first advance
    assert_eq!(state.primary_angle, initial.primary_angle + 6);
    assert!(loop_state.is_running());
}

#[test]
fn test_angle_after_n_frames() {
    for (start, speed, frames) in [(0i64, 1i64, 10u32), (45, -3, 7), (-720, 5, 100)] {
        let mut state = SceneState::new(speed, 2);
        state.primary_angle = start;
        let mut loop_state = LoopState::Running;
        for _ in 0..frames {
            (state, loop_state) = run_frame(state, loop_state, &[]);
        }
        assert_eq!(state.primary_angle, start + i64::from(frames) * speed);
        assert_eq!(state.secondary_angle, i64::from(frames) * 2);
    }
}

#[test]
fn test_up_has_no_saturation() {
    let mut state = SceneState::new(1_000_000, 2);
    for _ in 0..5 {
        state = state.handle_event(SceneEvent::IncreaseSpeed);
    }
    assert_eq!(state.primary_speed, 1_000_005);
}

#[test]
fn test_up_and_down_cancel() {
    let (state, _) = run_frame(
        SceneState::default(),
        LoopState::Running,
        &[SceneEvent::IncreaseSpeed, SceneEvent::DecreaseSpeed],
    );
    assert_eq!(state.primary_speed, 1);
    assert_eq!(state.primary_angle, 1);
}

#[test]
fn test_close_request_stops_loop() {
    let (state, loop_state) = run_frame(
        SceneState::default(),
        LoopState::Running,
        &[SceneEvent::IncreaseSpeed, SceneEvent::CloseRequested],
    );
    assert_eq!(loop_state, LoopState::Exiting);
    // Events before the close still applied
    assert_eq!(state.primary_speed, 2);

    let (_, loop_state) = run_frame(state, loop_state, &[]);
    assert_eq!(loop_state, LoopState::Exiting);
}
