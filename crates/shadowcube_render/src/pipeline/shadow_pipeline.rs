//! Light pass: depth-only rendering into the shadow map
//!
//! The pipelines have no fragment stage and no color targets. Only the
//! depth attachment is written.

use super::{pipeline_layout, MeshPipelineDesc, MeshPipelines, PassBinding, PassUniforms};
use crate::renderable::SceneBuffers;
use crate::shadow_map::ShadowTarget;

/// Depth-only pipelines for the light's view of the scene
pub struct ShadowPipeline {
    meshes: MeshPipelines,
    binding: PassBinding,
}

impl ShadowPipeline {
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shadow Depth Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/depth.wgsl").into()),
        });

        let binding = PassBinding::new(device, "Shadow");
        let layout = pipeline_layout(device, "Shadow", &binding);

        let meshes = MeshPipelines::new(device, &MeshPipelineDesc {
            label: "Shadow",
            shader: &shader,
            layout: &layout,
            color_format: None,
            sample_count: 1,
        });

        Self { meshes, binding }
    }

    /// Upload the light's view and projection matrices
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &PassUniforms) {
        self.binding.write(queue, uniforms);
    }

    /// Clear the shadow map to depth 1.0 and draw the scene into it
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &ShadowTarget,
        buffers: &SceneBuffers,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let size = target.size() as f32;
        pass.set_viewport(0.0, 0.0, size, size, 0.0, 1.0);

        self.meshes.draw(&mut pass, &self.binding.bind_group, buffers);
    }
}
