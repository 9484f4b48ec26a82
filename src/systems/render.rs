//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The shadow map and the light pass
//! - The camera pass and presentation

use std::sync::Arc;
use winit::window::Window;
use shadowcube_core::{Scene, SceneState};
use shadowcube_render::{
    camera::{LightCamera, OrbitCamera},
    context::RenderContext,
    pipeline::{CameraPipeline, PassUniforms, ShadowPipeline},
    shadow_map::ShadowTarget,
    RenderInitError, SceneBuffers, SceneGeometry,
};
use crate::config::AppConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost or outdated and has been reconfigured
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl RenderError {
    /// Whether the frame loop can keep going after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RenderError::OutOfMemory)
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            e => RenderError::Other(format!("{:?}", e)),
        }
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    shadow_target: ShadowTarget,
    shadow_pipeline: ShadowPipeline,
    camera_pipeline: CameraPipeline,
    buffers: SceneBuffers,
    orbit_camera: OrbitCamera,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    ///
    /// The scene geometry is generated and uploaded here, once.
    pub fn new(
        window: Arc<Window>,
        config: &AppConfig,
        scene: &Scene,
    ) -> Result<Self, RenderInitError> {
        let context = pollster::block_on(RenderContext::new(window, config.context_options()))?;

        let shadow_target = ShadowTarget::new(
            &context.device,
            config.shadow_map(),
            context.clamp_to_border,
        )?;

        // The light never moves, so its matrices are uploaded once
        let shadow_pipeline = ShadowPipeline::new(&context.device);
        let light: LightCamera = config.light_camera();
        shadow_pipeline.update_uniforms(
            &context.queue,
            &PassUniforms::new(light.view(), light.projection()),
        );

        let mut camera_pipeline = CameraPipeline::new(
            &context.device,
            context.config.format,
            context.sample_count,
        );

        // Ensure depth and MSAA targets exist
        camera_pipeline.ensure_targets(
            &context.device,
            context.config.width,
            context.config.height,
        );

        log::info!("Camera pass uses {}x MSAA", camera_pipeline.sample_count());

        let buffers = SceneGeometry::from_scene(scene).upload(&context.device);

        Ok(Self {
            context,
            shadow_target,
            shadow_pipeline,
            camera_pipeline,
            buffers,
            orbit_camera: config.orbit_camera(),
            clear_color: config.rendering.clear_color(),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.camera_pipeline
            .ensure_targets(&self.context.device, width, height);
    }

    /// Render a single frame: light pass, then camera pass, then present
    ///
    /// A lost or outdated surface is reconfigured before returning
    /// [`RenderError::SurfaceLost`]; the caller just skips the frame.
    pub fn render_frame(&mut self, state: &SceneState) -> Result<(), RenderError> {
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                let err = RenderError::from(e);
                if matches!(err, RenderError::SurfaceLost) {
                    let size = self.context.size;
                    self.resize(size.width, size.height);
                }
                return Err(err);
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.context.aspect_ratio();
        self.camera_pipeline.update_uniforms(
            &self.context.queue,
            &PassUniforms::new(
                self.orbit_camera.view(state),
                self.orbit_camera.projection(aspect),
            ),
        );

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Light pass
        self.shadow_pipeline
            .render(&mut encoder, &self.shadow_target, &self.buffers);

        // Camera pass
        self.camera_pipeline.render(
            &mut encoder,
            &view,
            &self.buffers,
            self.clear_color,
        );

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }

    pub fn shadow_map_size(&self) -> u32 {
        self.shadow_target.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_surface_error_mapping() {
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Lost), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Outdated), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::OutOfMemory), RenderError::OutOfMemory));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Timeout), RenderError::Other(_)));
    }

    #[test]
    fn test_only_out_of_memory_is_fatal() {
        assert!(RenderError::SurfaceLost.is_recoverable());
        assert!(RenderError::Other("timeout".to_string()).is_recoverable());
        assert!(!RenderError::OutOfMemory.is_recoverable());
    }
}
