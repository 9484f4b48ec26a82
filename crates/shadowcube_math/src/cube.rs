//! Wireframe cube geometry
//!
//! An axis-aligned cube centered at the origin with half-extent 1.
//! It is drawn as 12 independent line segments; vertices are not shared
//! between segments.

use crate::Vec3;

/// The 8 corners of the cube
pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// Index pairs into [`CUBE_VERTICES`]: back face, front face, then the
/// four edges joining them
pub const CUBE_EDGES: [[usize; 2]; 12] = [
    [0, 1], [1, 2], [2, 3], [3, 0],
    [4, 5], [5, 6], [6, 7], [7, 4],
    [0, 4], [1, 5], [2, 6], [3, 7],
];

/// Iterator over the cube's edges as `[start, end]` segments
///
/// Cloning the iterator (or calling [`cube_edges`] again) restarts the
/// sequence.
#[derive(Clone, Debug, Default)]
pub struct CubeEdges {
    next: usize,
}

/// Yield the 12 edges of the unit cube
pub fn cube_edges() -> CubeEdges {
    CubeEdges::default()
}

impl Iterator for CubeEdges {
    type Item = [Vec3; 2];

    fn next(&mut self) -> Option<Self::Item> {
        let [a, b] = *CUBE_EDGES.get(self.next)?;
        self.next += 1;
        Some([CUBE_VERTICES[a], CUBE_VERTICES[b]])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = CUBE_EDGES.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CubeEdges {}

impl std::iter::FusedIterator for CubeEdges {}
