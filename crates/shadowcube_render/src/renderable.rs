//! Renderable geometry - bridges the Scene to GPU buffers
//!
//! The scene is converted to vertices once at startup. Both passes then
//! draw from the same buffers every frame.

use wgpu::util::DeviceExt;

use shadowcube_core::Scene;
use crate::pipeline::SceneVertex;

/// GPU-ready vertices collected from a scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGeometry {
    /// Cube edges as a line list
    pub lines: Vec<SceneVertex>,
    /// Torus surface as a triangle list
    pub triangles: Vec<SceneVertex>,
}

impl SceneGeometry {
    /// Collect the cube edges and torus triangles, colored by the scene
    pub fn from_scene(scene: &Scene) -> Self {
        let lines = scene
            .line_list()
            .into_iter()
            .map(|p| SceneVertex::new(p, scene.cube_color))
            .collect();

        let triangles = scene
            .triangle_list()
            .into_iter()
            .map(|p| SceneVertex::new(p, scene.torus_color))
            .collect();

        Self { lines, triangles }
    }

    #[inline]
    pub fn line_vertex_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn triangle_vertex_count(&self) -> usize {
        self.triangles.len()
    }

    /// Upload both vertex lists into new GPU buffers
    pub fn upload(&self, device: &wgpu::Device) -> SceneBuffers {
        log::info!(
            "Uploading scene: {} line vertices, {} triangle vertices",
            self.lines.len(),
            self.triangles.len()
        );

        SceneBuffers {
            line_buffer: create_vertex_buffer(device, "Cube Edge Vertex Buffer", &self.lines),
            line_count: self.lines.len() as u32,
            triangle_buffer: create_vertex_buffer(device, "Torus Vertex Buffer", &self.triangles),
            triangle_count: self.triangles.len() as u32,
        }
    }
}

/// Vertex buffers for the scene, uploaded once
pub struct SceneBuffers {
    line_buffer: wgpu::Buffer,
    line_count: u32,
    triangle_buffer: wgpu::Buffer,
    triangle_count: u32,
}

impl SceneBuffers {
    pub fn line_buffer(&self) -> &wgpu::Buffer {
        &self.line_buffer
    }

    pub fn line_count(&self) -> u32 {
        self.line_count
    }

    pub fn triangle_buffer(&self) -> &wgpu::Buffer {
        &self.triangle_buffer
    }

    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }
}

fn create_vertex_buffer(device: &wgpu::Device, label: &str, vertices: &[SceneVertex]) -> wgpu::Buffer {
    // Zero-sized buffers are valid but cannot be bound; keep one vertex of room
    if vertices.is_empty() {
        return device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&SceneVertex::new(shadowcube_math::Vec3::ZERO, [0.0; 4])),
            usage: wgpu::BufferUsages::VERTEX,
        });
    }

    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowcube_math::TorusParams;

    #[test]
    fn test_default_scene_counts() {
        let geometry = SceneGeometry::from_scene(&Scene::default());
        assert_eq!(geometry.line_vertex_count(), 24);
        // 30 rings * 30 sides * 6 vertices
        assert_eq!(geometry.triangle_vertex_count(), 5400);
    }

    #[test]
    fn test_colors_follow_scene() {
        let cube = [1.0, 0.0, 0.0, 1.0];
        let torus = [0.0, 0.0, 1.0, 1.0];
        let scene = Scene::default().with_colors(cube, torus);
        let geometry = SceneGeometry::from_scene(&scene);

        assert!(geometry.lines.iter().all(|v| v.color == cube));
        assert!(geometry.triangles.iter().all(|v| v.color == torus));
    }

    #[test]
    fn test_line_vertices_are_cube_corners() {
        let geometry = SceneGeometry::from_scene(&Scene::default());
        for v in &geometry.lines {
            assert!(v.position.iter().all(|c| c.abs() == 1.0), "{:?}", v.position);
        }
    }

    #[test]
    fn test_triangle_vertices_lie_on_torus() {
        let params = TorusParams::new(0.3, 0.7, 12, 8).unwrap();
        let geometry = SceneGeometry::from_scene(&Scene::new(params).unwrap());
        for v in &geometry.triangles {
            let [x, y, z] = v.position;
            let ring = (x * x + y * y).sqrt() - 0.7;
            let d = ring * ring + z * z - 0.3 * 0.3;
            assert!(d.abs() < 1e-4, "{:?} off the surface by {}", v.position, d);
        }
    }
}
