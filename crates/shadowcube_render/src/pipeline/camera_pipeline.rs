//! Camera pass: flat-colored scene rendered to the window
//!
//! Draws into a multisampled color target that resolves into the surface
//! texture. With a sample count of 1 it draws into the surface directly.

use super::{pipeline_layout, MeshPipelineDesc, MeshPipelines, PassBinding, PassUniforms, DEPTH_FORMAT};
use crate::renderable::SceneBuffers;

/// Size-dependent attachments, recreated when the surface is resized
struct FrameTargets {
    width: u32,
    height: u32,
    /// Multisampled color target, `None` when not multisampling
    msaa_view: Option<wgpu::TextureView>,
    depth_view: wgpu::TextureView,
}

/// Color pipelines for the camera's view of the scene
pub struct CameraPipeline {
    meshes: MeshPipelines,
    binding: PassBinding,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
    targets: Option<FrameTargets>,
}

impl CameraPipeline {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat, sample_count: u32) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
        });

        let binding = PassBinding::new(device, "Camera");
        let layout = pipeline_layout(device, "Camera", &binding);

        let meshes = MeshPipelines::new(device, &MeshPipelineDesc {
            label: "Camera",
            shader: &shader,
            layout: &layout,
            color_format: Some(color_format),
            sample_count,
        });

        Self {
            meshes,
            binding,
            color_format,
            sample_count,
            targets: None,
        }
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Upload the camera's view and projection matrices
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &PassUniforms) {
        self.binding.write(queue, uniforms);
    }

    /// Make sure the depth and MSAA targets match the surface size
    pub fn ensure_targets(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if let Some(targets) = &self.targets {
            if targets.width == width && targets.height == height {
                return;
            }
        }

        log::debug!("Creating {}x{} camera targets ({}x MSAA)", width, height, self.sample_count);

        let msaa_view = (self.sample_count > 1).then(|| {
            create_attachment(device, "Camera MSAA Color", width, height, self.color_format, self.sample_count)
        });
        let depth_view = create_attachment(device, "Camera Depth", width, height, DEPTH_FORMAT, self.sample_count);

        self.targets = Some(FrameTargets {
            width,
            height,
            msaa_view,
            depth_view,
        });
    }

    /// Clear to `clear_color` and draw the scene into `surface_view`
    ///
    /// Call [`ensure_targets`](Self::ensure_targets) first; without targets
    /// nothing is drawn.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        buffers: &SceneBuffers,
        clear_color: wgpu::Color,
    ) {
        let Some(targets) = &self.targets else {
            log::warn!("Camera pass skipped: targets not created");
            return;
        };

        let (view, resolve_target) = match &targets.msaa_view {
            Some(msaa) => (msaa, Some(surface_view)),
            None => (surface_view, None),
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Camera Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: color_store_op(resolve_target.is_some()),
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.meshes.draw(&mut pass, &self.binding.bind_group, buffers);
    }
}

/// The multisampled contents are only needed until they are resolved
fn color_store_op(resolving: bool) -> wgpu::StoreOp {
    if resolving {
        wgpu::StoreOp::Discard
    } else {
        wgpu::StoreOp::Store
    }
}

fn create_attachment(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
