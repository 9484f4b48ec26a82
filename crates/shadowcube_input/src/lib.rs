//! Keyboard input for Shadowcube
//!
//! Maps raw winit key events onto the [`SceneEvent`]s the frame loop
//! understands.
//!
//! [`SceneEvent`]: shadowcube_core::SceneEvent

mod input_mapper;

pub use input_mapper::InputMapper;
