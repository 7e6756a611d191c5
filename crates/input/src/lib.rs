//! Pointer input mapped to camera actions.
//!
//! The windowing layer translates its events into [`PointerButton`] and
//! [`WheelDelta`] values; [`PointerTracker`] turns drags and wheel motion
//! into [`Action`]s the viewer consumes.
//!
//! # Invariants
//! - No action is produced for motion while no button is held.
//! - The viewer only sees actions, never raw window events.

pub mod action;
pub mod pointer;

pub use action::Action;
pub use pointer::{PointerButton, PointerTracker, WheelDelta};
