/// Light sources and the Lambert shading model shared by both renderers
use nalgebra::{Point3, Vector3};

use crate::color::Color;

/// Uniform light hitting every face equally
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }
}

/// Parallel light shining from `position` toward `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Point3::new(0.0, 1.0, 0.0),
            target: Point3::origin(),
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Point3::new(x, y, z);
    }

    /// Unit vector pointing from a lit surface back toward the light
    pub fn to_light(&self) -> Vector3<f32> {
        let offset = self.position - self.target;
        if offset.norm() < 1e-6 {
            return Vector3::y();
        }
        offset.normalize()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Directional(DirectionalLight),
}

impl Light {
    /// Scalar irradiance received by a surface with the given unit normal
    pub fn irradiance(&self, normal: &Vector3<f32>) -> f32 {
        match self {
            Light::Ambient(light) => light.intensity,
            Light::Directional(light) => light.intensity * normal.dot(&light.to_light()).max(0.0),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Ambient(light) => light.color,
            Light::Directional(light) => light.color,
        }
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_ignores_normal() {
        let light = Light::from(AmbientLight::new(Color::WHITE, 0.5));
        assert_eq!(light.irradiance(&Vector3::x()), 0.5);
        assert_eq!(light.irradiance(&-Vector3::x()), 0.5);
    }

    #[test]
    fn test_directional_lambert() {
        let mut directional = DirectionalLight::new(Color::WHITE, 0.8);
        directional.set_position(5.0, 5.0, 5.0);
        let light = Light::from(directional);

        let facing = Vector3::new(1.0, 1.0, 1.0).normalize();
        assert!((light.irradiance(&facing) - 0.8).abs() < 1e-6);
        assert_eq!(light.irradiance(&-facing), 0.0);
    }
}
