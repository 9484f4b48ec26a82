//! Renderer startup errors
//!
//! Everything here is fatal: the demo has no way to run without a device
//! or its shadow map.

use std::fmt;

/// Error raised while creating GPU resources at startup
#[derive(Debug)]
pub enum RenderInitError {
    /// The window surface could not be created or has no usable format
    SurfaceCreation(String),
    /// No adapter is compatible with the surface
    NoAdapter,
    /// The adapter refused to create a device
    DeviceRequest(String),
    /// Allocating the shadow map texture or its sampler failed
    ShadowAllocation(String),
}

impl fmt::Display for RenderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderInitError::SurfaceCreation(msg) => write!(f, "Surface creation failed: {}", msg),
            RenderInitError::NoAdapter => write!(f, "No compatible GPU adapter found"),
            RenderInitError::DeviceRequest(msg) => write!(f, "Device request failed: {}", msg),
            RenderInitError::ShadowAllocation(msg) => write!(f, "Shadow map allocation failed: {}", msg),
        }
    }
}

impl std::error::Error for RenderInitError {}

impl From<wgpu::CreateSurfaceError> for RenderInitError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        RenderInitError::SurfaceCreation(err.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for RenderInitError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        RenderInitError::DeviceRequest(err.to_string())
    }
}
