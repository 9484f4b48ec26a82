//! Core types for the Shadowcube demo
//!
//! This crate holds everything about the demo that does not touch the GPU:
//!
//! - [`SceneState`] - Rotation angles and speeds, advanced once per frame
//! - [`SceneEvent`] - Semantic input events fed into the state machine
//! - [`LoopState`] - Running/exiting state of the frame loop
//! - [`Scene`] - What gets drawn: the wire cube and the torus

mod scene_state;
mod scene;

pub use scene_state::{SceneState, SceneEvent, LoopState};
pub use scene::Scene;

// Re-export commonly used types from shadowcube_math for convenience
pub use shadowcube_math::{Vec3, Mat4, TorusParams, GeometryError};
