//! 3D Mathematics Library
//!
//! This crate provides the vector, matrix, and shape generators used by the
//! Shadowcube demo.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for transformations
//!
//! ## Shape Generators
//!
//! - [`cube_edges`] - The 12 edges of a unit cube as line segments
//! - [`torus_strips`] - A torus as a list of quad strips

mod vec3;
pub mod mat4;
pub mod cube;
pub mod torus;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use cube::{cube_edges, CubeEdges, CUBE_EDGES, CUBE_VERTICES};
pub use torus::{quad_strip_to_triangles, torus_strips, GeometryError, TorusParams, TorusStrips};
