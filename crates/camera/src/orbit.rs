use crate::PerspectiveCamera;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

/// Tuning for [`OrbitController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update when damping.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians, measured from +Y.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }
}

impl OrbitSettings {
    /// Check that each lower limit is at most its upper limit.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_distance > self.max_distance {
            return Err(format!(
                "min_distance {} exceeds max_distance {}",
                self.min_distance, self.max_distance
            ));
        }
        if self.min_polar_angle > self.max_polar_angle {
            return Err(format!(
                "min_polar_angle {} exceeds max_polar_angle {}",
                self.min_polar_angle, self.max_polar_angle
            ));
        }
        Ok(())
    }
}

/// Spherical coordinates around +Y: `theta` is the azimuth from +Z towards
/// +X, `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep `phi` off the poles so the view basis stays defined.
    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

/// Orbit-style camera controller: rotate, zoom and pan around a target.
///
/// Input methods only accumulate motion. [`update`](Self::update) applies it
/// to the camera, so it must be called once per frame.
#[derive(Debug, Clone)]
pub struct OrbitController {
    pub settings: OrbitSettings,
    target: Vec3,
    delta: Spherical,
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitController {
    /// Bind a controller to `camera` and aim the camera at `target`.
    pub fn bind(camera: &mut PerspectiveCamera, target: Vec3, settings: OrbitSettings) -> Self {
        let mut controller = Self {
            settings,
            target,
            delta: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        };
        controller.update(camera);
        controller
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta.phi -= angle;
    }

    /// Rotate from a pointer drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let speed = self.settings.rotate_speed;
        self.rotate_left(TAU * dx * speed / h);
        self.rotate_up(TAU * dy * speed / h);
    }

    /// Zoom by wheel notches. Positive steps move towards the target.
    pub fn zoom(&mut self, steps: f32) {
        self.scale *= 0.95_f32.powf(self.settings.zoom_speed * steps);
    }

    /// Pan from a pointer drag of `(dx, dy)` pixels, in screen space.
    pub fn pan(&mut self, camera: &PerspectiveCamera, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let speed = self.settings.pan_speed;
        let target_distance =
            (camera.position - self.target).length() * (camera.fov_degrees.to_radians() / 2.0).tan();
        let left = 2.0 * dx * speed * target_distance / h;
        let up = 2.0 * dy * speed * target_distance / h;
        self.pan_offset -= camera.right() * left;
        self.pan_offset += camera.up() * up;
    }

    /// Apply pending motion to `camera`. Returns `true` if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let s = &self.settings;
        let old_position = camera.position;

        let mut spherical = Spherical::from_offset(camera.position - self.target);
        if s.enable_damping {
            spherical.theta += self.delta.theta * s.damping_factor;
            spherical.phi += self.delta.phi * s.damping_factor;
        } else {
            spherical.theta += self.delta.theta;
            spherical.phi += self.delta.phi;
        }
        // Inverted limits resolve to the upper one.
        spherical.phi = spherical.phi.max(s.min_polar_angle).min(s.max_polar_angle);
        spherical.make_safe();
        spherical.radius = (spherical.radius * self.scale)
            .max(s.min_distance)
            .min(s.max_distance);

        if s.enable_damping {
            self.target += self.pan_offset * s.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if s.enable_damping {
            let keep = 1.0 - s.damping_factor;
            self.delta.theta *= keep;
            self.delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        let moved = camera.position.distance_squared(old_position) > EPS;
        if moved {
            tracing::trace!("camera moved to {:?}", camera.position);
        }
        moved
    }
}
