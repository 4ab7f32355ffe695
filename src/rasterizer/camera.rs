//! Look-at camera with a pinhole projection
//!
//! Camera space is left-handed: +X right, +Y up, +Z forward. Screen space
//! has Y pointing down.

use super::math::{perspective_transform, Vec3};

/// Anything closer than this to the camera plane cannot be projected
pub const DEFAULT_NEAR: f32 = 0.1;

/// Camera state
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,

    // Computed basis vectors
    pub basis_x: Vec3,
    pub basis_y: Vec3,
    pub basis_z: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, fov: f32) -> Self {
        let mut cam = Self {
            position,
            target,
            fov,
            near: DEFAULT_NEAR,
            basis_x: Vec3::new(1.0, 0.0, 0.0),
            basis_y: Vec3::new(0.0, 1.0, 0.0),
            basis_z: Vec3::new(0.0, 0.0, 1.0),
        };
        cam.update_basis();
        cam
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_basis();
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_basis();
    }

    /// Place the camera on a sphere around the target. Yaw 0 and pitch 0
    /// look down +Z.
    pub fn orbit(&mut self, yaw: f32, pitch: f32, radius: f32) {
        let pitch = pitch.clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );
        let offset = Vec3::new(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            -pitch.cos() * yaw.cos(),
        );
        self.position = self.target + offset * radius;
        self.update_basis();
    }

    pub fn update_basis(&mut self) {
        let forward = (self.target - self.position).normalize();
        if forward == Vec3::ZERO {
            return;
        }
        self.basis_z = forward;

        // Right vector; looking straight up or down falls back to world X
        let right = Vec3::UP.cross(forward);
        self.basis_x = if right.len() < 1e-6 {
            Vec3::new(1.0, 0.0, 0.0)
        } else {
            right.normalize()
        };

        // Up vector
        self.basis_y = self.basis_z.cross(self.basis_x);
    }

    /// World position to camera space
    pub fn to_view(&self, world: Vec3) -> Vec3 {
        perspective_transform(world - self.position, self.basis_x, self.basis_y, self.basis_z)
    }

    /// Pixels per world unit at distance 1
    pub fn focal_length(&self, height: usize) -> f32 {
        (height as f32 / 2.0) / (self.fov / 2.0).tan()
    }

    /// Project a world position to screen pixels. The returned `z` is the
    /// view depth. `None` when the point is not in front of the near plane.
    pub fn project(&self, world: Vec3, width: usize, height: usize) -> Option<Vec3> {
        let view = self.to_view(world);
        if !(view.z > self.near) {
            return None;
        }
        let scale = self.focal_length(height) / view.z;
        Some(Vec3::new(
            width as f32 / 2.0 + view.x * scale,
            height as f32 / 2.0 - view.y * scale,
            view.z,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, std::f32::consts::FRAC_PI_4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_basis() {
        let cam = Camera::default();
        assert!((cam.basis_x.x - 1.0).abs() < 1e-6);
        assert!((cam.basis_y.y - 1.0).abs() < 1e-6);
        assert!((cam.basis_z.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_project_center_and_axes() {
        let cam = Camera::default();
        let center = cam.project(Vec3::ZERO, 200, 100).unwrap();
        assert!((center.x - 100.0).abs() < 1e-4);
        assert!((center.y - 50.0).abs() < 1e-4);
        assert!((center.z - 5.0).abs() < 1e-4);

        // World up is screen up (smaller y), world right is screen right
        let up = cam.project(Vec3::new(0.0, 1.0, 0.0), 200, 100).unwrap();
        assert!(up.y < 50.0);
        let right = cam.project(Vec3::new(1.0, 0.0, 0.0), 200, 100).unwrap();
        assert!(right.x > 100.0);
    }

    #[test]
    fn test_behind_camera_is_none() {
        let cam = Camera::default();
        assert!(cam.project(Vec3::new(0.0, 0.0, -6.0), 100, 100).is_none());
        assert!(cam.project(Vec3::new(0.0, 0.0, -4.95), 100, 100).is_none());
    }

    #[test]
    fn test_orbit_keeps_distance_and_target() {
        let mut cam = Camera::default();
        cam.orbit(1.0, 0.5, 7.0);
        assert!((cam.position().distance(Vec3::ZERO) - 7.0).abs() < 1e-4);
        let view = cam.to_view(Vec3::ZERO);
        assert!(view.x.abs() < 1e-4 && view.y.abs() < 1e-4);
        assert!((view.z - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_looking_straight_down() {
        let cam = Camera::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, 1.0);
        assert!(cam.basis_x.is_finite() && cam.basis_y.is_finite());
        assert!(cam.project(Vec3::ZERO, 10, 10).is_some());
    }
}
