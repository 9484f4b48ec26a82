//! Shadowcube Rendering Library
//!
//! This crate provides the wgpu-based two-pass renderer: a depth-only pass
//! from the light into a shadow map, then a color pass from the camera.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`shadow_map::ShadowTarget`] - Off-screen depth-only render target
//! - [`camera::LightCamera`] / [`camera::OrbitCamera`] - Per-pass view and projection
//! - [`pipeline::ShadowPipeline`] - Depth-only light pass
//! - [`pipeline::CameraPipeline`] - Multisampled color pass
//! - [`renderable::SceneGeometry`] - Converts a [`Scene`] to GPU vertices

pub mod error;
pub mod context;
pub mod camera;
pub mod shadow_map;
pub mod pipeline;
pub mod renderable;

pub use error::RenderInitError;
pub use renderable::{SceneGeometry, SceneBuffers};

// Re-export core types for convenience
pub use shadowcube_core::{Scene, SceneState, Vec3, Mat4};
