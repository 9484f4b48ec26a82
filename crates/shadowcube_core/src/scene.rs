//! Scene description
//!
//! The scene is a wireframe unit cube and a solid torus sharing the
//! origin. Both are drawn twice per frame, once per render pass.

use shadowcube_math::{
    cube_edges, quad_strip_to_triangles, torus_strips, CubeEdges, GeometryError, TorusParams,
    TorusStrips, Vec3,
};

/// The shapes drawn by the demo and their colors
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    torus: TorusParams,
    /// RGBA color of the cube's edges
    pub cube_color: [f32; 4],
    /// RGBA color of the torus surface
    pub torus_color: [f32; 4],
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            torus: TorusParams::default(),
            cube_color: [1.0; 4],
            torus_color: [1.0; 4],
        }
    }
}

impl Scene {
    /// Create a scene, validating the torus parameters
    pub fn new(torus: TorusParams) -> Result<Self, GeometryError> {
        torus.validate()?;
        Ok(Self { torus, ..Self::default() })
    }

    pub fn with_colors(mut self, cube_color: [f32; 4], torus_color: [f32; 4]) -> Self {
        self.cube_color = cube_color;
        self.torus_color = torus_color;
        self
    }

    pub fn torus(&self) -> &TorusParams {
        &self.torus
    }

    /// The cube's 12 edges as line segments
    pub fn cube_segments(&self) -> CubeEdges {
        cube_edges()
    }

    /// The torus as quad strips
    pub fn torus_strips(&self) -> TorusStrips {
        torus_strips(&self.torus)
    }

    /// Cube edges flattened into a line list (two vertices per segment)
    pub fn line_list(&self) -> Vec<Vec3> {
        self.cube_segments().flatten().collect()
    }

    /// Torus strips flattened into a triangle list
    pub fn triangle_list(&self) -> Vec<Vec3> {
        self.torus_strips()
            .flat_map(|strip| quad_strip_to_triangles(&strip))
            .collect()
    }
}
