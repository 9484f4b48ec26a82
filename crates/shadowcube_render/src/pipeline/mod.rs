//! Render pipelines for the two passes
//!
//! Both passes draw the same vertex buffers with two topologies: a line
//! list for the cube's edges and a triangle list for the torus.

pub mod types;
pub mod shadow_pipeline;
pub mod camera_pipeline;

pub use types::{SceneVertex, PassUniforms};
pub use shadow_pipeline::ShadowPipeline;
pub use camera_pipeline::CameraPipeline;

use wgpu::util::DeviceExt;

use crate::renderable::SceneBuffers;

/// Depth format for the shadow map and the camera depth buffer
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniform buffer and bind group holding one pass's matrices
struct PassBinding {
    layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl PassBinding {
    fn new(device: &wgpu::Device, label: &str) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{} Bind Group Layout", label)),
            entries: &[
                // Uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Uniform Buffer", label)),
            contents: bytemuck::bytes_of(&PassUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", label)),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            layout,
            uniform_buffer,
            bind_group,
        }
    }

    fn write(&self, queue: &wgpu::Queue, uniforms: &PassUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

/// One pipeline per topology, sharing shader and layout
struct MeshPipelines {
    lines: wgpu::RenderPipeline,
    triangles: wgpu::RenderPipeline,
}

/// Settings that differ between the light and camera passes
struct MeshPipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    layout: &'a wgpu::PipelineLayout,
    /// `None` for depth-only rendering
    color_format: Option<wgpu::TextureFormat>,
    sample_count: u32,
}

impl MeshPipelines {
    fn new(device: &wgpu::Device, desc: &MeshPipelineDesc<'_>) -> Self {
        Self {
            lines: Self::create(device, desc, wgpu::PrimitiveTopology::LineList),
            triangles: Self::create(device, desc, wgpu::PrimitiveTopology::TriangleList),
        }
    }

    fn create(
        device: &wgpu::Device,
        desc: &MeshPipelineDesc<'_>,
        topology: wgpu::PrimitiveTopology,
    ) -> wgpu::RenderPipeline {
        let color_targets = [desc.color_format.map(|format| wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let fragment = desc.color_format.map(|_| wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            targets: &color_targets,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} {:?} Pipeline", desc.label, topology)),
            layout: Some(desc.layout),
            vertex: wgpu::VertexState {
                module: desc.shader,
                entry_point: Some("vs_main"),
                buffers: &[SceneVertex::buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment,
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Torus strips are not consistently wound
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: desc.sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    /// Draw the cube edges then the torus
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, bind_group: &wgpu::BindGroup, buffers: &SceneBuffers) {
        pass.set_bind_group(0, bind_group, &[]);

        if buffers.line_count() > 0 {
            pass.set_pipeline(&self.lines);
            pass.set_vertex_buffer(0, buffers.line_buffer().slice(..));
            pass.draw(0..buffers.line_count(), 0..1);
        }

        if buffers.triangle_count() > 0 {
            pass.set_pipeline(&self.triangles);
            pass.set_vertex_buffer(0, buffers.triangle_buffer().slice(..));
            pass.draw(0..buffers.triangle_count(), 0..1);
        }
    }
}

fn pipeline_layout(device: &wgpu::Device, label: &str, binding: &PassBinding) -> wgpu::PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} Pipeline Layout", label)),
        bind_group_layouts: &[&binding.layout],
        push_constant_ranges: &[],
    })
}
