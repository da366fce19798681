/// Viewport dimensions shared by the camera and the renderer
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 400;

/// Size of the rendering surface in pixels
///
/// Supplied once at scene creation and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl ViewportConfig {
    /// Zero dimensions are raised to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Fill in missing dimensions with the 400x400 defaults
    pub fn with_defaults(width: Option<u32>, height: Option<u32>) -> Self {
        Self::new(
            width.unwrap_or(DEFAULT_WIDTH),
            height.unwrap_or(DEFAULT_HEIGHT),
        )
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
