//! Cameras for the two render passes
//!
//! - [`LightCamera`] looks from a fixed light position at the origin and
//!   renders into the square shadow map.
//! - [`OrbitCamera`] sits a fixed distance in front of the scene and spins
//!   the scene by the current [`SceneState`] rotations.

use shadowcube_core::SceneState;
use shadowcube_math::{mat4, Mat4, Vec3};

/// Perspective camera placed at the light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for LightCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.0, 4.0, -2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees: 45.0,
            near: 1.0,
            far: 7.5,
        }
    }
}

impl LightCamera {
    pub fn view(&self) -> Mat4 {
        mat4::look_at(self.position, self.target, self.up)
    }

    /// Projection for a square (1:1) shadow map
    pub fn projection(&self) -> Mat4 {
        mat4::perspective(self.fov_degrees.to_radians(), 1.0, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        mat4::mul(self.projection(), self.view())
    }
}

/// Viewer camera that rotates the scene in front of it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// How far the scene is pushed away from the viewer along -Z
    pub distance: f32,
    /// Axis of the user-controlled rotation
    pub primary_axis: Vec3,
    /// Axis of the constant rotation, applied first
    pub secondary_axis: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: 5.0,
            primary_axis: Vec3::new(3.0, 1.0, 1.0),
            secondary_axis: Vec3::Z,
            fov_degrees: 45.0,
            near: 0.1,
            far: 50.0,
        }
    }
}

impl OrbitCamera {
    /// `translate(0, 0, -distance) * rotate(primary) * rotate(secondary)`
    pub fn view(&self, state: &SceneState) -> Mat4 {
        let translate = mat4::translation(Vec3::new(0.0, 0.0, -self.distance));
        let primary = mat4::axis_angle_rotation(state.primary_rotation_radians(), self.primary_axis);
        let secondary = mat4::axis_angle_rotation(state.secondary_rotation_radians(), self.secondary_axis);
        mat4::mul(translate, mat4::mul(primary, secondary))
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, state: &SceneState, aspect: f32) -> Mat4 {
        mat4::mul(self.projection(aspect), self.view(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowcube_math::cube_edges;
    use shadowcube_math::mat4::transform_point_ndc;

    const EPSILON: f32 = 0.0001;

    fn inside_clip_volume(ndc: [f32; 3]) -> bool {
        ndc[0].abs() <= 1.0 && ndc[1].abs() <= 1.0 && (0.0..=1.0).contains(&ndc[2])
    }

    #[test]
    fn test_light_sees_origin_centered() {
        let light = LightCamera::default();
        let ndc = transform_point_ndc(light.view_projection(), Vec3::ZERO);
        assert!(ndc[0].abs() < EPSILON);
        assert!(ndc[1].abs() < EPSILON);
        assert!(ndc[2] > 0.0 && ndc[2] < 1.0, "depth {}", ndc[2]);
    }

    #[test]
    fn test_cube_fits_in_light_frustum() {
        let vp = LightCamera::default().view_projection();
        for [a, b] in cube_edges() {
            for v in [a, b] {
                let ndc = transform_point_ndc(vp, v);
                assert!(inside_clip_volume(ndc), "{:?} projects to {:?}", v, ndc);
            }
        }
    }

    #[test]
    fn test_orbit_view_at_rest_is_translation() {
        let camera = OrbitCamera::default();
        let state = SceneState::default();
        let view = camera.view(&state);
        let p = mat4::transform_point(view, Vec3::X);
        assert!((p[0] - 1.0).abs() < EPSILON);
        assert!(p[1].abs() < EPSILON);
        assert!((p[2] + 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_orbit_secondary_rotation_about_z() {
        let camera = OrbitCamera::default();
        let mut state = SceneState::default();
        state.secondary_angle = 90;
        let p = mat4::transform_point(camera.view(&state), Vec3::X);
        assert!(p[0].abs() < EPSILON, "got {:?}", p);
        assert!((p[1] - 1.0).abs() < EPSILON, "got {:?}", p);
        assert!((p[2] + 5.0).abs() < EPSILON, "got {:?}", p);
    }

    #[test]
    fn test_orbit_primary_axis_is_fixed() {
        let camera = OrbitCamera::default();
        let mut state = SceneState::default();
        state.primary_angle = 123;
        let axis = camera.primary_axis.normalized();
        let p = mat4::transform_point(camera.view(&state), axis);
        assert!((p[0] - axis.x).abs() < EPSILON);
        assert!((p[1] - axis.y).abs() < EPSILON);
        assert!((p[2] - (axis.z - 5.0)).abs() < EPSILON);
    }

    #[test]
    fn test_orbit_angles_equivalent_modulo_full_turn() {
        let camera = OrbitCamera::default();
        let mut a = SceneState::default();
        a.primary_angle = 30;
        let mut b = a;
        b.primary_angle = 30 + 360 * 7;
        assert_eq!(camera.view(&a), camera.view(&b));
    }

    #[test]
    fn test_cube_visible_from_camera() {
        let camera = OrbitCamera::default();
        let mut state = SceneState::default();
        state.primary_angle = 77;
        state.secondary_angle = 154;
        let vp = camera.view_projection(&state, 800.0 / 600.0);
        for [a, b] in cube_edges() {
            for v in [a, b] {
                assert!(inside_clip_volume(transform_point_ndc(vp, v)));
            }
        }
    }
}
