//! Shared first-person camera resource.
//!
//! The observer pose every spawner agrees on: where the player stands, where
//! they look, and the lens used to decide what is on screen. Input/look
//! controllers mutate it; the flash spawner and the shot ray cast read it.
//!
//! Conventions: right-handed, +Y up, viewport origin at the bottom-left with
//! `(1, 1)` at the top-right, depth measured along `forward` in world units.

use bevy_ecs::prelude::Resource;
use glam::{Mat4, Vec3, Vec4};

use crate::resources::trainingconfig::CameraSettings;

/// Directions shorter than this are treated as degenerate.
const DIRECTION_EPSILON: f32 = 1.0e-4;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayerCamera {
    pub position: Vec3,
    forward: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

impl PlayerCamera {
    /// Camera at the configured position looking down -Z.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        PlayerCamera {
            position: settings.position,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_y_degrees: settings.fov_y_degrees,
            aspect: settings.aspect,
            near: 0.05,
            far: 1000.0,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_forward(mut self, forward: Vec3) -> Self {
        self.set_forward(forward);
        self
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Point the camera along `forward`. Degenerate vectors are ignored.
    pub fn set_forward(&mut self, forward: Vec3) {
        if let Some(dir) = forward.try_normalize() {
            self.forward = dir;
        }
    }

    /// Turn the camera toward a world point.
    pub fn look_at(&mut self, target: Vec3) {
        self.set_forward(target - self.position);
    }

    /// Set the view direction from yaw (around +Y, 0 = -Z) and pitch, in degrees.
    pub fn set_yaw_pitch(&mut self, yaw_degrees: f32, pitch_degrees: f32) {
        let yaw = yaw_degrees.to_radians();
        let pitch = pitch_degrees.clamp(-89.0, 89.0).to_radians();
        let forward = Vec3::new(
            -yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        );
        self.set_forward(forward);
    }

    /// Forward projected onto the ground plane, falling back to -Z when the
    /// camera looks straight up or down.
    pub fn flat_forward(&self) -> Vec3 {
        let flat = Vec3::new(self.forward.x, 0.0, self.forward.z);
        if flat.length_squared() < DIRECTION_EPSILON {
            Vec3::NEG_Z
        } else {
            flat.normalize()
        }
    }

    pub fn view(&self) -> Mat4 {
        let up = if self.forward.cross(self.up).length_squared() < DIRECTION_EPSILON {
            // Looking along `up`; any perpendicular axis keeps the basis valid.
            Vec3::Z
        } else {
            self.up
        };
        Mat4::look_to_rh(self.position, self.forward, up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Map a world point to viewport space.
    ///
    /// `x`/`y` are in `[0, 1]` for points inside the frustum's side planes;
    /// `z` is the eye-space depth along `forward` (negative behind the camera).
    pub fn world_to_viewport(&self, point: Vec3) -> Vec3 {
        let depth = (point - self.position).dot(self.forward);
        let clip = self.view_projection() * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w.abs() < f32::EPSILON {
            return Vec3::new(0.5, 0.5, depth);
        }
        let ndc = clip.truncate() / clip.w;
        Vec3::new(ndc.x * 0.5 + 0.5, ndc.y * 0.5 + 0.5, depth)
    }

    /// Viewport point of `point` and whether it is on screen: in front of the
    /// camera with `x` and `y` inside `[0, 1]`.
    pub fn project(&self, point: Vec3) -> (Vec3, bool) {
        let vp = self.world_to_viewport(point);
        let on_screen = vp.z > 0.0 && (0.0..=1.0).contains(&vp.x) && (0.0..=1.0).contains(&vp.y);
        (vp, on_screen)
    }

    pub fn is_on_screen(&self, point: Vec3) -> bool {
        self.project(point).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn camera() -> PlayerCamera {
        PlayerCamera::default().with_position(Vec3::ZERO)
    }

    #[test]
    fn test_point_straight_ahead_is_viewport_centre() {
        let vp = camera().world_to_viewport(Vec3::new(0.0, 0.0, -10.0));
        assert!(approx_eq(vp.x, 0.5));
        assert!(approx_eq(vp.y, 0.5));
        assert!(approx_eq(vp.z, 10.0));
    }

    #[test]
    fn test_point_up_and_right_maps_to_upper_right_quadrant() {
        let vp = camera().world_to_viewport(Vec3::new(1.0, 1.0, -10.0));
        assert!(vp.x > 0.5);
        assert!(vp.y > 0.5);
    }

    #[test]
    fn test_point_behind_has_negative_depth() {
        let cam = camera();
        let vp = cam.world_to_viewport(Vec3::new(0.0, 0.0, 5.0));
        assert!(vp.z < 0.0);
        assert!(!cam.is_on_screen(Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_project_agrees_with_viewport_and_visibility() {
        let cam = camera();
        let ahead = Vec3::new(0.5, -0.5, -6.0);
        let (vp, on_screen) = cam.project(ahead);
        assert_eq!(vp, cam.world_to_viewport(ahead));
        assert!(on_screen);
        assert_eq!(cam.is_on_screen(ahead), on_screen);

        let (vp, on_screen) = cam.project(Vec3::new(0.0, 0.0, 6.0));
        assert!(vp.z < 0.0);
        assert!(!on_screen);
    }

    #[test]
    fn test_point_far_to_the_side_is_off_screen() {
        assert!(!camera().is_on_screen(Vec3::new(50.0, 0.0, -1.0)));
    }

    #[test]
    fn test_set_forward_ignores_zero_vector() {
        let mut cam = camera();
        cam.set_forward(Vec3::ZERO);
        assert_eq!(cam.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn test_yaw_ninety_looks_down_negative_x() {
        let mut cam = camera();
        cam.set_yaw_pitch(90.0, 0.0);
        assert!(approx_eq(cam.forward().x, -1.0));
        assert!(approx_eq(cam.forward().z, 0.0));
    }

    #[test]
    fn test_flat_forward_falls_back_when_looking_up() {
        let cam = camera().with_forward(Vec3::Y);
        assert_eq!(cam.flat_forward(), Vec3::NEG_Z);
        // The view matrix must stay finite in this pose.
        assert!(cam.view().is_finite());
    }
}
