/// Pointer surfaces and the drag controls attached to them
///
/// A [`PointerSurface`] is anything that can deliver press, move and release
/// events to registered callbacks: a DOM element in the browser, or a
/// [`PointerDispatcher`] fed by a terminal event loop. [`add_drag_controls`]
/// registers the three callbacks and hands back a [`DragControls`] handle that
/// owns them until it is disposed or dropped.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::drag::{DragRotation, DragState, PointerPosition};
use crate::transform::Rotatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

pub type PointerCallback = Box<dyn FnMut(PointerPosition)>;

pub trait PointerSurface {
    /// Token returned on registration and consumed on removal
    type Listener;

    fn add_pointer_listener(&self, kind: PointerEventKind, callback: PointerCallback) -> Self::Listener;

    /// Removing a listener the surface no longer knows about is a no-op.
    fn remove_pointer_listener(&self, listener: Self::Listener);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type SharedCallback = Rc<RefCell<PointerCallback>>;

#[derive(Default)]
struct DispatcherInner {
    next_id: u64,
    listeners: Vec<(ListenerId, PointerEventKind, SharedCallback)>,
}

/// In-process pointer surface
///
/// Clones share the same listener list. Listeners may add or remove
/// listeners, or dispatch again, from inside a callback: a listener removed
/// mid-dispatch is not called, and one added mid-dispatch waits for the next
/// event. A listener is never re-entered while it is already running.
#[derive(Clone, Default)]
pub struct PointerDispatcher {
    inner: Rc<RefCell<DispatcherInner>>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every listener registered for `kind`
    ///
    /// Returns how many listeners were invoked.
    pub fn dispatch(&self, kind: PointerEventKind, position: PointerPosition) -> usize {
        let matching: Vec<(ListenerId, SharedCallback)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, listener_kind, _)| *listener_kind == kind)
            .map(|(id, _, callback)| (*id, Rc::clone(callback)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in matching {
            if !self.is_registered(id) {
                continue;
            }
            if let Ok(mut callback) = callback.try_borrow_mut() {
                callback(position);
                delivered += 1;
            }
        }
        delivered
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.inner
            .borrow()
            .listeners
            .iter()
            .any(|(listener, _, _)| *listener == id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl fmt::Debug for PointerDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerDispatcher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl PointerSurface for PointerDispatcher {
    type Listener = ListenerId;

    fn add_pointer_listener(&self, kind: PointerEventKind, callback: PointerCallback) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, kind, Rc::new(RefCell::new(callback))));
        id
    }

    fn remove_pointer_listener(&self, listener: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(id, _, _)| *id != listener);
    }
}

/// Owned registration of the press / move / release callbacks
///
/// Dropping the handle detaches the callbacks.
pub struct DragControls<S: PointerSurface> {
    surface: S,
    listeners: Vec<S::Listener>,
    drag: Rc<RefCell<DragRotation>>,
}

/// Rotate `target` while the pointer is dragged across `surface`
///
/// Horizontal movement turns the target around its vertical axis and
/// vertical movement around its horizontal axis, 0.01 radians per pixel.
pub fn add_drag_controls<T, S>(target: Rc<RefCell<T>>, surface: S) -> DragControls<S>
where
    T: Rotatable + 'static,
    S: PointerSurface,
{
    let drag = Rc::new(RefCell::new(DragRotation::new()));

    let on_down: PointerCallback = {
        let drag = Rc::clone(&drag);
        Box::new(move |position: PointerPosition| drag.borrow_mut().press(position))
    };
    let on_move: PointerCallback = {
        let drag = Rc::clone(&drag);
        Box::new(move |position: PointerPosition| {
            let delta = drag.borrow_mut().move_to(position);
            if let Some(delta) = delta {
                delta.apply_to(target.borrow_mut().rotation_mut());
            }
        })
    };
    let on_up: PointerCallback = {
        let drag = Rc::clone(&drag);
        Box::new(move |_: PointerPosition| drag.borrow_mut().release())
    };

    let listeners = vec![
        surface.add_pointer_listener(PointerEventKind::Down, on_down),
        surface.add_pointer_listener(PointerEventKind::Move, on_move),
        surface.add_pointer_listener(PointerEventKind::Up, on_up),
    ];
    log::debug!("drag controls attached");

    DragControls {
        surface,
        listeners,
        drag,
    }
}

impl<S: PointerSurface> DragControls<S> {
    /// Detach every listener; later calls do nothing
    pub fn dispose(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        for listener in self.listeners.drain(..) {
            self.surface.remove_pointer_listener(listener);
        }
        self.drag.borrow_mut().release();
        log::debug!("drag controls detached");
    }

    pub fn is_disposed(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.borrow().is_dragging()
    }

    pub fn state(&self) -> DragState {
        self.drag.borrow().state()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: PointerSurface> Drop for DragControls<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
