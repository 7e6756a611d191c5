//! Rendering interface: viewport state, per-frame uniforms and the compositor seam.
//!
//! # Invariants
//! - A compositor never mutates viewer state; it consumes [`Frame`]s.
//! - The aspect ratio always matches the last accepted viewport extent.
//!
//! The [`Compositor`] trait is the boundary between the viewer loop and a
//! concrete GPU backend. [`DebugTextCompositor`] implements it without a GPU
//! for headless runs and tests.

mod compositor;
mod uniforms;
mod viewport;

pub use compositor::{Compositor, DebugTextCompositor};
pub use uniforms::{Frame, FrameUniforms};
pub use viewport::Viewport;

pub fn crate_info() -> &'static str {
    "shaderview-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
