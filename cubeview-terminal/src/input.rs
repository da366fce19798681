/// Translation of crossterm mouse events into pointer events
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use cubeview_core::{PointerEventKind, PointerPosition};

use crate::config::InputConfig;

/// Map a terminal mouse event to a pointer event in pixel coordinates
///
/// Only the left button drives the drag. Motion is forwarded whether or not
/// a button is held; the drag controls decide whether it matters.
pub fn pointer_event(
    event: &MouseEvent,
    input: &InputConfig,
) -> Option<(PointerEventKind, PointerPosition)> {
    let kind = match event.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerEventKind::Down,
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerEventKind::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerEventKind::Up,
        _ => return None,
    };

    let position = PointerPosition::new(
        event.column as f64 * input.cell_width,
        event.row as f64 * input.cell_height,
    );

    Some((kind, position))
}
