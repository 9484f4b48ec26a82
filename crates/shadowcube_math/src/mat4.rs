//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`), which is the layout WGSL
//! expects for `mat4x4<f32>` uniforms. Projections target wgpu's clip space,
//! where depth runs from 0 (near) to 1 (far).

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) and return the homogeneous result `[x, y, z, w]`
pub fn transform_point(m: Mat4, p: Vec3) -> [f32; 4] {
    [
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
        m[0][3] * p.x + m[1][3] * p.y + m[2][3] * p.z + m[3][3],
    ]
}

/// Transform a point and apply the perspective divide
pub fn transform_point_ndc(m: Mat4, p: Vec3) -> [f32; 3] {
    let [x, y, z, w] = transform_point(m, p);
    [x / w, y / w, z / w]
}

/// Translation by `offset`
pub fn translation(offset: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = offset.x;
    m[3][1] = offset.y;
    m[3][2] = offset.z;
    m
}

/// Rotation of `angle` radians about `axis`
///
/// The axis does not need to be unit length. Positive angles rotate
/// counter-clockwise when looking down the axis towards the origin.
/// A zero axis yields the identity.
pub fn axis_angle_rotation(angle: f32, axis: Vec3) -> Mat4 {
    let a = axis.normalized();
    if a == Vec3::ZERO {
        return IDENTITY;
    }

    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    [
        [t * a.x * a.x + c, t * a.x * a.y + s * a.z, t * a.x * a.z - s * a.y, 0.0],
        [t * a.x * a.y - s * a.z, t * a.y * a.y + c, t * a.y * a.z + s * a.x, 0.0],
        [t * a.x * a.z + s * a.y, t * a.y * a.z - s * a.x, t * a.z * a.z + c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Right-handed perspective projection with [0, 1] depth
///
/// # Arguments
/// * `fov_y` - Vertical field of view in radians
/// * `aspect` - Width / height
/// * `near`, `far` - Positive distances to the clip planes
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn point_approx_eq(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y))
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !approx_eq(a[i][j], b[i][j]) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(transform_point(IDENTITY, p), [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_translation() {
        let m = translation(Vec3::new(0.0, 0.0, -5.0));
        let result = transform_point(m, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(result, [1.0, 1.0, -4.0, 1.0]);
    }

    #[test]
    fn test_rotation_about_z() {
        use std::f32::consts::FRAC_PI_2;

        let m = axis_angle_rotation(FRAC_PI_2, Vec3::Z);
        let result = transform_point(m, Vec3::X);
        assert!(point_approx_eq(result, [0.0, 1.0, 0.0, 1.0]),
            "X should become Y, got {:?}", result);
    }

    #[test]
    fn test_rotation_axis_is_normalized() {
        let unit = axis_angle_rotation(0.7, Vec3::new(3.0, 1.0, 1.0).normalized());
        let raw = axis_angle_rotation(0.7, Vec3::new(3.0, 1.0, 1.0));
        assert!(mat_approx_eq(unit, raw));
    }

    #[test]
    fn test_rotation_keeps_axis_fixed() {
        let axis = Vec3::new(3.0, 1.0, 1.0);
        let m = axis_angle_rotation(1.3, axis);
        let result = transform_point(m, axis);
        assert!(point_approx_eq(result, [3.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(axis_angle_rotation(1.0, Vec3::ZERO), IDENTITY);
    }

    #[test]
    fn test_mul_applies_right_first() {
        use std::f32::consts::FRAC_PI_2;

        // Rotate X onto Y, then push it back along Z
        let m = mul(
            translation(Vec3::new(0.0, 0.0, -5.0)),
            axis_angle_rotation(FRAC_PI_2, Vec3::Z),
        );
        let result = transform_point(m, Vec3::X);
        assert!(point_approx_eq(result, [0.0, 1.0, -5.0, 1.0]), "got {:?}", result);
    }

    #[test]
    fn test_mul_identity() {
        let a = axis_angle_rotation(0.5, Vec3::Y);
        assert!(mat_approx_eq(mul(IDENTITY, a), a));
        assert!(mat_approx_eq(mul(a, IDENTITY), a));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = perspective(45f32.to_radians(), 1.0, 1.0, 7.5);

        let near = transform_point(proj, Vec3::new(0.0, 0.0, -1.0));
        assert!(approx_eq(near[2] / near[3], 0.0), "near plane depth {:?}", near);

        let far = transform_point(proj, Vec3::new(0.0, 0.0, -7.5));
        assert!(approx_eq(far[2] / far[3], 1.0), "far plane depth {:?}", far);
    }

    #[test]
    fn test_perspective_aspect() {
        let proj = perspective(45f32.to_radians(), 800.0 / 600.0, 0.1, 50.0);
        assert!(approx_eq(proj[0][0] * 800.0 / 600.0, proj[1][1]));
    }

    #[test]
    fn test_look_at_moves_target_onto_negative_z() {
        let eye = Vec3::new(2.0, 4.0, -2.0);
        let view = look_at(eye, Vec3::ZERO, Vec3::Y);
        let origin = transform_point(view, Vec3::ZERO);

        assert!(approx_eq(origin[0], 0.0));
        assert!(approx_eq(origin[1], 0.0));
        assert!(approx_eq(origin[2], -eye.length()), "got {:?}", origin);
    }

    #[test]
    fn test_look_at_eye_maps_to_origin() {
        let eye = Vec3::new(2.0, 4.0, -2.0);
        let view = look_at(eye, Vec3::ZERO, Vec3::Y);
        assert!(point_approx_eq(transform_point(view, eye), [0.0, 0.0, 0.0, 1.0]));
    }
}
