//! GPU-compatible data types
//!
//! These types are `#[repr(C)]` and derive `Pod` so they can be uploaded
//! with `bytemuck`. Layouts must match the WGSL structs in `shaders/`.

use bytemuck::{Pod, Zeroable};
use shadowcube_math::{mat4, Mat4, Vec3};

/// A scene vertex: object-space position and RGBA color
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl SceneVertex {
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    /// Vertex buffer layout shared by both passes
    ///
    /// The depth shader only reads location 0.
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// Per-pass uniforms
/// Layout: 128 bytes (must match `PassUniforms` in the WGSL shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PassUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: Mat4,
    /// Projection matrix (64 bytes)
    pub projection_matrix: Mat4,
}

impl PassUniforms {
    pub fn new(view_matrix: Mat4, projection_matrix: Mat4) -> Self {
        Self {
            view_matrix,
            projection_matrix,
        }
    }
}

impl Default for PassUniforms {
    fn default() -> Self {
        Self::new(mat4::IDENTITY, mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_scene_vertex_size() {
        // 3 floats position + 4 floats color = 28 bytes
        assert_eq!(size_of::<SceneVertex>(), 28);
    }

    #[test]
    fn test_pass_uniforms_size() {
        // Two 4x4 f32 matrices
        assert_eq!(size_of::<PassUniforms>(), 128);
    }

    #[test]
    fn test_vertex_buffer_layout_stride() {
        let layout = SceneVertex::buffer_layout();
        assert_eq!(layout.array_stride, size_of::<SceneVertex>() as u64);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<SceneVertex>(), 4);
        assert_eq!(std::mem::align_of::<PassUniforms>(), 4);
    }

    #[test]
    fn test_vertex_from_vec3() {
        let v = SceneVertex::new(Vec3::new(1.0, -1.0, 0.5), [1.0; 4]);
        assert_eq!(v.position, [1.0, -1.0, 0.5]);
        assert_eq!(v.color, [1.0; 4]);
    }
}
