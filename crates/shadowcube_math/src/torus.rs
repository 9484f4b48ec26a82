//! Torus geometry
//!
//! The torus lies around the Z axis: `outer_radius` is the distance from
//! the Z axis to the center of the tube and `inner_radius` is the radius of
//! the tube itself. It is produced as `rings` independent quad strips, each
//! stitching two neighbouring tube slices together around the full circle.

use std::f64::consts::TAU;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Vec3;

/// Error for invalid shape parameters
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The tube must be split into at least one side
    InvalidSideCount(u32),
    /// The torus must have at least one ring
    InvalidRingCount(u32),
    /// Radii must be finite and non-negative
    InvalidRadius { name: &'static str, value: f32 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidSideCount(n) => write!(f, "Torus side count must be positive, got {}", n),
            GeometryError::InvalidRingCount(n) => write!(f, "Torus ring count must be positive, got {}", n),
            GeometryError::InvalidRadius { name, value } => {
                write!(f, "Torus {} must be finite and non-negative, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Torus shape parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusParams {
    /// Radius of the tube
    pub inner_radius: f32,
    /// Distance from the torus center to the tube center
    pub outer_radius: f32,
    /// Subdivisions around the main circle
    pub sides: u32,
    /// Number of strips around the tube
    pub rings: u32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            inner_radius: 0.3,
            outer_radius: 0.7,
            sides: 30,
            rings: 30,
        }
    }
}

impl TorusParams {
    /// Create validated torus parameters
    pub fn new(inner_radius: f32, outer_radius: f32, sides: u32, rings: u32) -> Result<Self, GeometryError> {
        let params = Self { inner_radius, outer_radius, sides, rings };
        params.validate()?;
        Ok(params)
    }

    /// Check that the parameters describe a drawable torus
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.sides == 0 {
            return Err(GeometryError::InvalidSideCount(self.sides));
        }
        if self.rings == 0 {
            return Err(GeometryError::InvalidRingCount(self.rings));
        }
        for (name, value) in [("inner_radius", self.inner_radius), ("outer_radius", self.outer_radius)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::InvalidRadius { name, value });
            }
        }
        Ok(())
    }

    /// Number of vertices in each quad strip
    pub fn strip_len(&self) -> usize {
        2 * (self.sides as usize + 1)
    }

    /// Position on the surface for a (possibly fractional) ring coordinate
    /// and an integer side index
    fn point(&self, ring: f64, side: u32) -> Vec3 {
        let ring_step = TAU / self.rings as f64;
        let side_step = TAU / self.sides as f64;
        let r = self.inner_radius as f64;
        let big_r = self.outer_radius as f64;

        let (ring_sin, ring_cos) = (ring * ring_step).sin_cos();
        let (side_sin, side_cos) = (side as f64 * side_step).sin_cos();
        let radial = big_r + r * ring_cos;

        Vec3::new(
            (radial * side_cos) as f32,
            (radial * side_sin) as f32,
            (r * ring_sin) as f32,
        )
    }
}

/// Lazy iterator over the quad strips of a torus
#[derive(Clone, Debug)]
pub struct TorusStrips {
    params: TorusParams,
    ring: u32,
}

/// Generate the torus as `params.rings` quad strips
///
/// Parameters are expected to be valid (see [`TorusParams::validate`]);
/// zero sides or rings yield no strips.
pub fn torus_strips(params: &TorusParams) -> TorusStrips {
    TorusStrips { params: *params, ring: 0 }
}

impl Iterator for TorusStrips {
    type Item = Vec<Vec3>;

    fn next(&mut self) -> Option<Self::Item> {
        let p = &self.params;
        if p.sides == 0 || self.ring >= p.rings {
            return None;
        }

        let i = self.ring;
        self.ring += 1;

        let mut strip = Vec::with_capacity(p.strip_len());
        for j in 0..=p.sides {
            for k in 0..2 {
                let s = ((i + k) % p.rings) as f64 + 0.5;
                let t = j % p.sides;
                strip.push(p.point(s, t));
            }
        }
        Some(strip)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.params.sides == 0 {
            0
        } else {
            self.params.rings.saturating_sub(self.ring) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TorusStrips {}

/// Convert a quad strip into a triangle list
///
/// Each consecutive vertex pair forms a rung of the strip; every two
/// rungs form one quad, split into two triangles. Trailing vertices that
/// do not complete a quad are ignored.
pub fn quad_strip_to_triangles(strip: &[Vec3]) -> Vec<Vec3> {
    let quads = (strip.len() / 2).saturating_sub(1);
    let mut triangles = Vec::with_capacity(quads * 6);

    for q in 0..quads {
        let v0 = strip[2 * q];
        let v1 = strip[2 * q + 1];
        let v2 = strip[2 * q + 2];
        let v3 = strip[2 * q + 3];
        triangles.extend_from_slice(&[v0, v1, v2, v2, v1, v3]);
    }

    triangles
}
