/// Object orientation and the rotation matrices built from it
use std::f64::consts::TAU;

use nalgebra::{Matrix4, Vector3};

/// Rotation state around three axes (in radians)
///
/// `y` is the rotation around the vertical axis and `x` the rotation around
/// the horizontal axis. Angles accumulate without clamping or wraparound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Anything whose orientation can be driven by the drag controls
pub trait Rotatable {
    fn rotation_mut(&mut self) -> &mut RotationState;
}

impl Rotatable for RotationState {
    fn rotation_mut(&mut self) -> &mut RotationState {
        self
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(wrap_angle(rotation.x), 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, wrap_angle(rotation.y), 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, wrap_angle(rotation.z)));

        // Intrinsic X, then Y, then Z
        rx * ry * rz
    }
}

/// Reduce to one turn in f64 before narrowing, so large angles keep their precision
fn wrap_angle(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}
