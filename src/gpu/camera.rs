//! Camera for 3D orbit view.

use glam::{Mat4, Vec3};

const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Orbit camera looking at a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Camera {
    /// Place the camera at `position`, looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3, fov_y: f32) -> Self {
        let offset = position - target;
        let distance = offset.length().max(NEAR);
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            target,
            fov_y,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Combined projection and view matrix.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, NEAR, FAR) * self.view_matrix()
    }

    /// Rotate around the target by a cursor drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-1.5, 1.5);
    }

    /// Move toward (positive) or away from the target.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 0.5).clamp(1.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looking_at_round_trip() {
        let start = Vec3::new(0.0, 12.0, 6.0);
        let camera = Camera::looking_at(start, Vec3::ZERO, 60f32.to_radians());
        assert!((camera.position() - start).length() < 1e-4);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 1.0);
        camera.orbit(0.0, 10_000.0);
        assert_eq!(camera.pitch, 1.5);
        // Orbiting keeps the distance.
        assert!((camera.position().length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_limits() {
        let mut camera = Camera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 1.0);
        camera.zoom(100.0);
        assert_eq!(camera.distance, 1.0);
    }
}
