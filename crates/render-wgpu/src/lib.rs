//! wgpu render backend for the shader viewer.
//!
//! Each frame runs three passes:
//! 1. scene pass: clears to the configured colour and draws the optional
//!    reference grid into an off-screen target,
//! 2. shader pass: runs the user's vertex/fragment pair over a full-screen
//!    quad, sampling the scene target, into a second off-screen target,
//! 3. present pass: copies the result onto the surface.
//!
//! Off-screen targets are sized to the viewport's drawing buffer, so the
//! pixel ratio controls the cost of the shader pass independently of the
//! window size.
//!
//! # Shader pass interface
//! See [`SHADER_PASS_INTERFACE`] for the bindings user shaders may declare.

mod gpu;
mod shaders;

pub use gpu::{RendererOptions, ShaderPassRenderer, ShaderUniforms, clear_color};
pub use shaders::SHADER_PASS_INTERFACE;

/// Errors from building or running the render passes.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("shader pass failed validation: {0}")]
    ShaderValidation(String),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
