//! Camera description shared by the background scene and the carousel.
//!
//! Platform-agnostic: the web frontend turns this into a view-projection
//! uniform each frame.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
use glam::{Mat4, Vec3};

/// Right-handed perspective camera aimed at `target`, with an extra pitch
/// applied on top of the look-at orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub pitch: f32,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            pitch: 0.0,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-3), self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(-self.pitch) * Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = Camera::new(Vec3::new(3.0, -2.0, 50.0), 16.0 / 9.0);
        let clip = cam.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    }

    #[test]
    fn positive_pitch_moves_origin_down_the_screen() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 50.0), 1.0);
        cam.pitch = 0.1;
        let clip = cam.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.y / clip.w < 0.0);
    }

    #[test]
    fn zero_sized_viewport_keeps_aspect() {
        let mut cam = Camera::new(Vec3::Z, 2.0);
        cam.set_viewport(0, 10);
        assert_eq!(cam.aspect, 2.0);
        cam.set_viewport(300, 300);
        assert_eq!(cam.aspect, 1.0);
    }
}
