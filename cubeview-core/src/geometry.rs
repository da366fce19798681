/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

use crate::color::Color;

/// Fraction of a cubie face covered by its sticker
const STICKER_FILL: f32 = 0.9;

/// Largest puzzle `Mesh::cube_puzzle` will build
pub const MAX_PUZZLE_LAYERS: u32 = 32;

/// Sticker color for each outward face direction of a puzzle cube
pub const FACE_COLORS: [([f32; 3], u32); 6] = [
    ([0.0, 1.0, 0.0], 0xffffff),  // up: white
    ([0.0, -1.0, 0.0], 0xffd500), // down: yellow
    ([1.0, 0.0, 0.0], 0xb71234),  // right: red
    ([-1.0, 0.0, 0.0], 0xff5800), // left: orange
    ([0.0, 0.0, 1.0], 0x009b48),  // front: green
    ([0.0, 0.0, -1.0], 0x0046ad), // back: blue
];

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A flat-colored triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
            color: Color::WHITE,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Add a square facing `normal`, wound counter-clockwise seen from outside
    pub fn add_quad(&mut self, center: Point3<f32>, normal: Vector3<f32>, half: f32, color: Color) {
        let (u, v) = face_tangents(&normal);
        let corner = |su: f32, sv: f32| {
            let p = center + (u * su + v * sv) * half;
            Vertex::new(p.x, p.y, p.z, normal.x, normal.y, normal.z)
        };
        let (c0, c1, c2, c3) = (
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        );

        self.add_triangle(Triangle::new(c0, c1, c2).with_color(color));
        self.add_triangle(Triangle::new(c0, c2, c3).with_color(color));
    }

    /// Create a single cube with one sticker color per face
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        for (direction, hex) in FACE_COLORS {
            let normal = Vector3::from(direction);
            mesh.add_quad(Point3::from(normal * half), normal, half, Color::from_hex(hex));
        }

        mesh
    }

    /// Create a layered puzzle cube of edge length `size`
    ///
    /// Only outward-facing cubie faces are emitted; each becomes a sticker
    /// slightly smaller than the cubie so the grid between pieces shows.
    /// `layers` is clamped to `1..=MAX_PUZZLE_LAYERS`.
    pub fn cube_puzzle(layers: u32, size: f32) -> Self {
        if layers > MAX_PUZZLE_LAYERS {
            log::warn!("puzzle of {} layers clamped to {}", layers, MAX_PUZZLE_LAYERS);
        }
        let layers = layers.clamp(1, MAX_PUZZLE_LAYERS);
        let cubie = size / layers as f32;
        let origin = -size / 2.0 + cubie / 2.0;
        let last = layers - 1;

        let per_face = layers as usize * layers as usize;
        let mut mesh = Self::with_capacity(per_face * 6 * 2);

        for i in 0..layers {
            for j in 0..layers {
                for k in 0..layers {
                    let center = Point3::new(
                        origin + i as f32 * cubie,
                        origin + j as f32 * cubie,
                        origin + k as f32 * cubie,
                    );

                    for (direction, hex) in FACE_COLORS {
                        let on_surface = match direction {
                            [x, _, _] if x > 0.0 => i == last,
                            [x, _, _] if x < 0.0 => i == 0,
                            [_, y, _] if y > 0.0 => j == last,
                            [_, y, _] if y < 0.0 => j == 0,
                            [_, _, z] if z > 0.0 => k == last,
                            _ => k == 0,
                        };
                        if !on_surface {
                            continue;
                        }

                        let normal = Vector3::from(direction);
                        mesh.add_quad(
                            center + normal * (cubie / 2.0),
                            normal,
                            cubie / 2.0 * STICKER_FILL,
                            Color::from_hex(hex),
                        );
                    }
                }
            }
        }

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Two unit tangents `(u, v)` with `u x v == normal` for an axis-aligned normal
fn face_tangents(normal: &Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let (x, y, z) = (Vector3::x(), Vector3::y(), Vector3::z());
    if normal.x > 0.5 {
        (y, z)
    } else if normal.x < -0.5 {
        (z, y)
    } else if normal.y > 0.5 {
        (z, x)
    } else if normal.y < -0.5 {
        (x, z)
    } else if normal.z > 0.5 {
        (x, y)
    } else {
        (y, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_has_twelve_outward_triangles() {
        let mesh = Mesh::cube(2.0);
        assert_eq!(mesh.triangles.len(), 12);

        for triangle in &mesh.triangles {
            let centroid = triangle
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.position.coords)
                / 3.0;
            // Winding must agree with the stored normal and point away from the center
            assert!(triangle.calculate_normal().dot(&triangle.vertices[0].normal) > 0.99);
            assert!(triangle.calculate_normal().dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_puzzle_sticker_count() {
        // 3x3x3: 9 stickers per face, 6 faces, 2 triangles each
        let mesh = Mesh::cube_puzzle(3, 3.0);
        assert_eq!(mesh.triangles.len(), 9 * 6 * 2);
    }

    #[test]
    fn test_puzzle_faces_carry_their_color() {
        let mesh = Mesh::cube_puzzle(2, 2.0);
        let white = Color::from_hex(0xffffff);
        let up_faces = mesh
            .triangles
            .iter()
            .filter(|t| t.vertices[0].normal.y > 0.5)
            .collect::<Vec<_>>();

        assert_eq!(up_faces.len(), 4 * 2);
        assert!(up_faces.iter().all(|t| t.color == white));
        assert!(up_faces
            .iter()
            .all(|t| t.vertices.iter().all(|v| (v.position.y - 1.0).abs() < 1e-6)));
    }

    #[test]
    fn test_puzzle_zero_layers_is_single_cubie() {
        let mesh = Mesh::cube_puzzle(0, 1.0);
        assert_eq!(mesh.triangles.len(), 12);
    }

    #[test]
    fn test_puzzle_layers_are_clamped() {
        let mesh = Mesh::cube_puzzle(70_000, 3.0);
        let per_face = (MAX_PUZZLE_LAYERS * MAX_PUZZLE_LAYERS) as usize;
        assert_eq!(mesh.triangles.len(), per_face * 6 * 2);
    }
}
