/// Cubeview Web - WASM bindings for the puzzle cube viewer
///
/// `create_scene` mounts an anti-aliased WebGL2 canvas in a container element,
/// and `add_drag_controls` rotates a `CubeObject` while the mouse is dragged
/// over a DOM event target. The hosting page drives the animation loop by
/// calling `SceneHandles::render` each frame.

use std::cell::RefCell;
use std::rc::Rc;

use cubeview_core::{self as cubeview, DragControls, Mesh, Object3D, RotationState, SceneSetup, ViewportConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlCanvasElement};

pub mod logging;
pub mod renderer;
pub mod surface;

pub use renderer::WebRenderer;
pub use surface::CanvasSurface;

const DEFAULT_LAYERS: u32 = 3;
const DEFAULT_CUBE_SIZE: f32 = 3.0;

/// Scene, camera and renderer produced by one `create_scene` call
#[wasm_bindgen]
pub struct SceneHandles {
    setup: SceneSetup,
    renderer: WebRenderer,
}

#[wasm_bindgen]
impl SceneHandles {
    /// The renderer's output surface, already attached to the container
    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> HtmlCanvasElement {
        self.renderer.canvas().clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.setup.renderer.viewport.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.setup.renderer.viewport.height
    }

    #[wasm_bindgen(getter, js_name = cameraAspect)]
    pub fn camera_aspect(&self) -> f32 {
        self.setup.camera.aspect
    }

    #[wasm_bindgen(getter, js_name = cameraFov)]
    pub fn camera_fov(&self) -> f32 {
        self.setup.camera.fov_degrees()
    }

    #[wasm_bindgen(getter, js_name = lightCount)]
    pub fn light_count(&self) -> usize {
        self.setup.scene.lights().len()
    }

    /// Draw `object` with its current orientation
    pub fn render(&self, object: &CubeObject) {
        self.renderer
            .render(&self.setup.scene, &self.setup.camera, &object.inner.borrow());
    }
}

/// Create a scene, camera and renderer and mount the canvas in `container`
///
/// Width and height default to 400. Every call creates a new canvas; earlier
/// ones are left untouched.
#[wasm_bindgen(js_name = createScene)]
pub fn create_scene(
    container: &Element,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<SceneHandles, JsValue> {
    let setup = cubeview::create_scene(ViewportConfig::with_defaults(width, height));

    let document = container
        .owner_document()
        .ok_or_else(|| JsValue::from_str("container is not attached to a document"))?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;

    let renderer = WebRenderer::new(canvas, &setup.renderer)?;
    container.append_child(renderer.canvas())?;

    Ok(SceneHandles { setup, renderer })
}

/// Puzzle cube whose orientation the drag controls drive
#[wasm_bindgen]
pub struct CubeObject {
    inner: Rc<RefCell<Object3D>>,
}

#[wasm_bindgen]
impl CubeObject {
    #[wasm_bindgen(constructor)]
    pub fn new(layers: Option<u32>) -> CubeObject {
        let mesh = Mesh::cube_puzzle(layers.unwrap_or(DEFAULT_LAYERS), DEFAULT_CUBE_SIZE);
        CubeObject {
            inner: Rc::new(RefCell::new(Object3D::new(mesh))),
        }
    }

    /// Rotation around the horizontal axis, in radians
    #[wasm_bindgen(getter, js_name = rotationX)]
    pub fn rotation_x(&self) -> f64 {
        self.inner.borrow().rotation.x
    }

    /// Rotation around the vertical axis, in radians
    #[wasm_bindgen(getter, js_name = rotationY)]
    pub fn rotation_y(&self) -> f64 {
        self.inner.borrow().rotation.y
    }

    #[wasm_bindgen(js_name = setRotation)]
    pub fn set_rotation(&self, x: f64, y: f64) {
        self.inner.borrow_mut().rotation = RotationState::new(x, y, 0.0);
    }
}

/// Disposer returned by `addDragControls`
#[wasm_bindgen]
pub struct DragControlsHandle {
    controls: DragControls<CanvasSurface>,
}

#[wasm_bindgen]
impl DragControlsHandle {
    /// Remove the mousedown, mousemove and mouseup listeners; safe to repeat
    pub fn dispose(&mut self) {
        self.controls.dispose();
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.controls.is_dragging()
    }
}

/// Rotate `object` while the mouse is dragged over `surface`
#[wasm_bindgen(js_name = addDragControls)]
pub fn add_drag_controls(object: &CubeObject, surface: &EventTarget) -> DragControlsHandle {
    let surface = CanvasSurface::new(surface.clone());
    DragControlsHandle {
        controls: cubeview::add_drag_controls(Rc::clone(&object.inner), surface),
    }
}

/// Change the console log level ("error", "warn", "info", "debug", "trace")
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) {
    logging::init_logging(logging::parse_level(level));
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    logging::init_logging(log::LevelFilter::Info);
    Ok(())
}
