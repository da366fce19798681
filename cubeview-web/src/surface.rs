/// DOM event targets as pointer surfaces
use cubeview_core::controls::{PointerCallback, PointerEventKind, PointerSurface};
use cubeview_core::PointerPosition;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MouseEvent};

/// DOM event name for each pointer event kind
pub fn event_name(kind: PointerEventKind) -> &'static str {
    match kind {
        PointerEventKind::Down => "mousedown",
        PointerEventKind::Move => "mousemove",
        PointerEventKind::Up => "mouseup",
    }
}

/// Any DOM event target, typically the renderer's canvas
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    target: EventTarget,
}

impl CanvasSurface {
    pub fn new(target: EventTarget) -> Self {
        Self { target }
    }
}

/// Registered listener; owns the JS closure so it lives until removal
pub struct DomListener {
    event: &'static str,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl PointerSurface for CanvasSurface {
    type Listener = DomListener;

    fn add_pointer_listener(&self, kind: PointerEventKind, mut callback: PointerCallback) -> DomListener {
        let event = event_name(kind);
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            callback(PointerPosition::new(
                event.client_x() as f64,
                event.client_y() as f64,
            ));
        }) as Box<dyn FnMut(MouseEvent)>);

        if let Err(err) = self
            .target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to attach {} listener: {:?}", event, err);
        }

        DomListener { event, closure }
    }

    fn remove_pointer_listener(&self, listener: DomListener) {
        if let Err(err) = self.target.remove_event_listener_with_callback(
            listener.event,
            listener.closure.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to detach {} listener: {:?}", listener.event, err);
        }
        // Dropping the closure invalidates the JS function
    }
}
