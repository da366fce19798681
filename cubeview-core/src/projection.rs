/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Perspective camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at the origin looking down -Z
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Point3::origin(),
            target: Point3::new(0.0, 0.0, -1.0),
            up: Vector3::y(),
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Point3::new(x, y, z);
    }

    pub fn look_at(&mut self, x: f32, y: f32, z: f32) {
        self.target = Point3::new(x, y, z);
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a 3D point to 2D screen space
    ///
    /// Returns `(x, y, depth)` with `depth` in normalized device units, or
    /// `None` when the point falls outside the view frustum.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.view_projection_matrix() * model_matrix;
        let clip = mvp * point.to_homogeneous();

        // Behind the camera or degenerate
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&ndc_x)
            || !(-1.0..=1.0).contains(&ndc_y)
            || !(-1.0..=1.0).contains(&depth)
        {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}
