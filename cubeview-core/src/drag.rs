/// Drag-to-rotate state machine
///
/// Converts a press / move / release pointer sequence into incremental
/// rotation deltas. Idle until a press; every move while dragging yields the
/// delta since the previous sample scaled by [`DRAG_SENSITIVITY`].
use crate::transform::RotationState;

/// Radians of rotation per pixel of pointer movement
pub const DRAG_SENSITIVITY: f64 = 0.01;

/// Pointer location in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rotation produced by one movement sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationDelta {
    /// Driven by horizontal pointer movement
    pub around_vertical: f64,
    /// Driven by vertical pointer movement
    pub around_horizontal: f64,
}

impl RotationDelta {
    pub fn apply_to(&self, rotation: &mut RotationState) {
        rotation.rotate(self.around_horizontal, self.around_vertical, 0.0);
    }
}

/// `previous_position` is only meaningful while `is_dragging` is set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub is_dragging: bool,
    pub previous_position: PointerPosition,
}

#[derive(Debug, Default)]
pub struct DragRotation {
    state: DragState,
}

impl DragRotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    pub fn press(&mut self, position: PointerPosition) {
        log::trace!("drag start at ({}, {})", position.x, position.y);
        self.state = DragState {
            is_dragging: true,
            previous_position: position,
        };
    }

    /// Returns `None` when no drag is in progress.
    pub fn move_to(&mut self, position: PointerPosition) -> Option<RotationDelta> {
        if !self.state.is_dragging {
            return None;
        }

        let dx = position.x - self.state.previous_position.x;
        let dy = position.y - self.state.previous_position.y;
        self.state.previous_position = position;

        Some(RotationDelta {
            around_vertical: dx * DRAG_SENSITIVITY,
            around_horizontal: dy * DRAG_SENSITIVITY,
        })
    }

    pub fn release(&mut self) {
        if self.state.is_dragging {
            log::trace!("drag end");
        }
        self.state.is_dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let drag = DragRotation::new();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut drag = DragRotation::new();
        assert_eq!(drag.move_to(PointerPosition::new(50.0, 50.0)), None);
        assert_eq!(drag.state(), DragState::default());
    }

    #[test]
    fn test_single_move_delta() {
        let mut drag = DragRotation::new();
        drag.press(PointerPosition::new(100.0, 100.0));
        let delta = drag.move_to(PointerPosition::new(150.0, 130.0)).unwrap();

        assert!((delta.around_vertical - 0.5).abs() < 1e-6);
        assert!((delta.around_horizontal - 0.3).abs() < 1e-6);
        assert_eq!(drag.state().previous_position, PointerPosition::new(150.0, 130.0));
    }

    #[test]
    fn test_release_returns_to_idle() {
        let mut drag = DragRotation::new();
        drag.press(PointerPosition::new(0.0, 0.0));
        drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(drag.move_to(PointerPosition::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_delta_maps_axes() {
        let mut rotation = RotationState::zero();
        RotationDelta {
            around_vertical: 0.2,
            around_horizontal: -0.1,
        }
        .apply_to(&mut rotation);

        assert_eq!(rotation.y, 0.2);
        assert_eq!(rotation.x, -0.1);
        assert_eq!(rotation.z, 0.0);
    }

    #[test]
    fn test_one_pixel_step_at_large_angle() {
        let mut rotation = RotationState::new(0.0, 200_000.0, 0.0);
        let mut drag = DragRotation::new();
        drag.press(PointerPosition::new(0.0, 0.0));
        drag.move_to(PointerPosition::new(1.0, 0.0))
            .unwrap()
            .apply_to(&mut rotation);

        assert!((rotation.y - 200_000.0 - 0.01).abs() < 1e-9);
    }
}
