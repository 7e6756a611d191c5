use crate::Viewport;
use glam::{Mat4, Vec3};

/// Values fed to the custom shader pass each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub camera_position: Vec3,
    pub camera_direction: Vec3,
    /// Frames rendered so far, the shader's `time` input.
    pub elapsed_frames: u64,
    pub aspect_ratio: f32,
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            camera_position: Vec3::ZERO,
            camera_direction: Vec3::NEG_Z,
            elapsed_frames: 0,
            aspect_ratio: 1.0,
        }
    }
}

/// Everything a compositor needs to produce one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub uniforms: FrameUniforms,
    /// Camera view-projection for the scene pass.
    pub view_projection: Mat4,
    pub viewport: Viewport,
}
