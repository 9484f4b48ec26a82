//! Input mapping from raw key events to scene events
//!
//! Controls:
//! - Up arrow: increase rotation speed
//! - Down arrow: decrease rotation speed
//! - Escape: close the window

use shadowcube_core::SceneEvent;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Maps raw keyboard input to scene events
pub struct InputMapper;

impl InputMapper {
    /// Map a keyboard event to a scene event
    ///
    /// Only fresh key presses count: releases and OS auto-repeat return
    /// `None`, so holding a key changes the speed once.
    pub fn map_keyboard(key: KeyCode, state: ElementState, repeat: bool) -> Option<SceneEvent> {
        if state != ElementState::Pressed || repeat {
            return None;
        }

        match key {
            KeyCode::ArrowUp => Some(SceneEvent::IncreaseSpeed),
            KeyCode::ArrowDown => Some(SceneEvent::DecreaseSpeed),
            KeyCode::Escape => Some(SceneEvent::CloseRequested),
            _ => None,
        }
    }
}
