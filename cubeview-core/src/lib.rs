/// Cubeview Core Library - Scene setup and drag rotation shared by every host
///
/// This library provides the host-independent pieces of the cube viewer:
/// camera and lighting setup, puzzle-cube geometry, and the pointer-driven
/// rotation state machine used by the terminal and web front ends.

pub mod color;
pub mod controls;
pub mod drag;
pub mod geometry;
pub mod lighting;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use color::Color;
pub use controls::{add_drag_controls, DragControls, PointerDispatcher, PointerEventKind, PointerSurface};
pub use drag::{DragRotation, DragState, PointerPosition, RotationDelta, DRAG_SENSITIVITY};
pub use geometry::{Mesh, Triangle, Vertex, MAX_PUZZLE_LAYERS};
pub use lighting::{AmbientLight, DirectionalLight, Light};
pub use projection::Camera;
pub use scene::{create_scene, Object3D, RendererSettings, Scene, SceneSetup};
pub use transform::{Rotatable, RotationState, Transform};
pub use viewport::ViewportConfig;
