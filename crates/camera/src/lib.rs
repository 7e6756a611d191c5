//! Viewer camera: a perspective camera and an orbit controller bound to it.
//!
//! # Invariants
//! - The controller only moves the camera inside [`OrbitController::update`].
//! - After every update the camera looks at the controller's target.

mod orbit;
mod perspective;

pub use orbit::{OrbitController, OrbitSettings};
pub use perspective::PerspectiveCamera;
