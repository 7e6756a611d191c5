use glam::{Mat4, Vec3};

/// Perspective camera with an explicit viewing direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    direction: Vec3,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.01, 100.0)
    }
}

impl PerspectiveCamera {
    /// New camera at the origin looking down -Z.
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            fov_degrees,
            aspect,
            near,
            far,
            direction: Vec3::NEG_Z,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Unit vector the camera looks along, in world space.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn right(&self) -> Vec3 {
        let right = self.direction.cross(Vec3::Y).normalize_or_zero();
        if right == Vec3::ZERO {
            // Looking straight up or down.
            Vec3::X
        } else {
            right
        }
    }

    /// Camera-space up axis expressed in world space.
    pub fn up(&self) -> Vec3 {
        let up = self.right().cross(self.direction).normalize_or_zero();
        if up == Vec3::ZERO {
            Vec3::Y
        } else {
            up
        }
    }

    /// Aim at `target`. A target at the camera position keeps the old direction.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir != Vec3::ZERO {
            self.direction = dir;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
