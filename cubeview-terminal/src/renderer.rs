/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cubeview_core::{Camera, Color, Object3D, Scene, Triangle};
use nalgebra::Matrix4;
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Brightest expected luminance: a white face lit by every light in the default scene
const FULL_BRIGHTNESS: f32 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    character: ' ',
    color: Color::BLACK,
};

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    pub fn render_object(&mut self, object: &Object3D, scene: &Scene, camera: &Camera) {
        let model = object.model_matrix();
        for triangle in &object.mesh.triangles {
            self.render_triangle(triangle, &model, scene, camera);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        scene: &Scene,
        camera: &Camera,
    ) {
        let mut screen_coords = Vec::with_capacity(3);
        for vertex in &triangle.vertices {
            match camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(coords) => screen_coords.push(coords),
                None => return, // Triangle is clipped
            }
        }

        // World-space normal for lighting
        let normal = model_matrix
            .transform_vector(&triangle.calculate_normal())
            .normalize();
        let shaded = scene.shade(triangle.color, &normal);
        let cell = Cell {
            character: ramp_char(shaded.luminance() / FULL_BRIGHTNESS),
            color: shaded,
        };

        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32)], cell: Cell) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.cells[idx] = cell;
                        }
                    }
                }
            }
        }
    }

    /// Character at a cell, for inspection
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].character)
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                let [r, g, b] = cell.color.to_rgb8();

                writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                writer.queue(Print(cell.character))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick the ramp character for a brightness in `[0, 1]`
fn ramp_char(brightness: f32) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    // Lit faces never vanish into the blank first entry
    let index = 1 + (brightness.clamp(0.0, 1.0) * (last - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_core::{create_scene, Mesh, ViewportConfig};

    #[test]
    fn test_cube_covers_center_cell() {
        let setup = create_scene(ViewportConfig::new(80 * 8, 40 * 16));
        let object = Object3D::new(Mesh::cube(3.0));
        let mut renderer = AsciiRenderer::new(80, 40);

        renderer.render_object(&object, &setup.scene, &setup.camera);

        assert_ne!(renderer.char_at(40, 20), Some(' '));
        // Corners stay empty
        assert_eq!(renderer.char_at(0, 0), Some(' '));
    }

    #[test]
    fn test_clear_resets_cells() {
        let setup = create_scene(ViewportConfig::new(80 * 8, 40 * 16));
        let object = Object3D::new(Mesh::cube(3.0));
        let mut renderer = AsciiRenderer::new(80, 40);

        renderer.render_object(&object, &setup.scene, &setup.camera);
        renderer.clear();
        assert_eq!(renderer.char_at(40, 20), Some(' '));
    }

    #[test]
    fn test_ramp_char_bounds() {
        assert_eq!(ramp_char(0.0), '.');
        assert_eq!(ramp_char(1.0), '@');
        assert_eq!(ramp_char(7.0), '@');
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }
}
