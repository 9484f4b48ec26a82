//! Shadowcube - a spinning wire cube and torus rendered with a shadow map pass
//!
//! The binary in `main.rs` wires these modules to a winit event loop.

pub mod config;
pub mod systems;
