use crate::Action;
use glam::Vec2;

/// Pixels of wheel travel counted as one zoom notch.
const PIXELS_PER_NOTCH: f32 = 50.0;
/// Pixels of vertical middle-button drag counted as one zoom notch.
const DOLLY_PIXELS_PER_NOTCH: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Scroll amount as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Line-based scrolling; positive is away from the user.
    Lines(f32),
    /// Pixel-based scrolling (touchpads); positive is away from the user.
    Pixels(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
    Dolly,
}

/// Tracks cursor position and held buttons across pointer events.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    cursor: Option<Vec2>,
    drag: Option<DragMode>,
    pan_modifier: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift/Ctrl held: the primary button pans instead of rotating.
    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pan_modifier = held;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn on_button(&mut self, button: PointerButton, pressed: bool) {
        if !pressed {
            self.drag = None;
            return;
        }
        self.drag = Some(match button {
            PointerButton::Primary if self.pan_modifier => DragMode::Pan,
            PointerButton::Primary => DragMode::Rotate,
            PointerButton::Secondary => DragMode::Pan,
            PointerButton::Middle => DragMode::Dolly,
        });
    }

    /// Record a new cursor position; returns the drag action, if any.
    pub fn on_cursor_moved(&mut self, position: Vec2) -> Option<Action> {
        let previous = self.cursor.replace(position)?;
        let delta = position - previous;
        let action = match self.drag? {
            DragMode::Rotate => Action::Rotate(delta),
            DragMode::Pan => Action::Pan(delta),
            // Dragging down moves away from the target.
            DragMode::Dolly => Action::Zoom(-delta.y / DOLLY_PIXELS_PER_NOTCH),
        };
        (!action.is_noop()).then_some(action)
    }

    /// The cursor left the window; the next motion starts a fresh delta.
    pub fn on_cursor_left(&mut self) {
        self.cursor = None;
    }

    pub fn on_wheel(&self, delta: WheelDelta) -> Option<Action> {
        let steps = match delta {
            WheelDelta::Lines(y) => y,
            WheelDelta::Pixels(y) => y / PIXELS_PER_NOTCH,
        };
        let action = Action::Zoom(steps);
        (!action.is_noop()).then_some(action)
    }
}
