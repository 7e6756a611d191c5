use glam::Vec2;

/// A camera action produced from pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Orbit around the target by a drag delta in pixels.
    Rotate(Vec2),
    /// Move the target in screen space by a drag delta in pixels.
    Pan(Vec2),
    /// Zoom by wheel notches. Positive moves towards the target.
    Zoom(f32),
}

impl Action {
    /// Whether applying this action would leave the camera untouched.
    pub fn is_noop(&self) -> bool {
        match self {
            Action::Rotate(d) | Action::Pan(d) => *d == Vec2::ZERO,
            Action::Zoom(steps) => *steps == 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_deltas_are_noops() {
        assert!(Action::Rotate(Vec2::ZERO).is_noop());
        assert!(Action::Pan(Vec2::ZERO).is_noop());
        assert!(Action::Zoom(0.0).is_noop());
    }

    #[test]
    fn nonzero_deltas_are_not_noops() {
        assert!(!Action::Rotate(Vec2::new(1.0, 0.0)).is_noop());
        assert!(!Action::Pan(Vec2::new(0.0, -3.0)).is_noop());
        assert!(!Action::Zoom(-1.0).is_noop());
    }
}
