/// Scene container and the initializer that wires camera, lights and renderer settings
use nalgebra::{Matrix4, Vector3};

use crate::color::Color;
use crate::geometry::Mesh;
use crate::lighting::{AmbientLight, DirectionalLight, Light};
use crate::projection::Camera;
use crate::transform::{Rotatable, RotationState, Transform};
use crate::viewport::ViewportConfig;

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
/// Oblique offset that shows three faces of a cube at once
pub const CAMERA_POSITION: [f32; 3] = [5.0, 5.0, 5.0];

pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const DIRECTIONAL_INTENSITY: f32 = 0.8;
/// Co-located with the camera
pub const DIRECTIONAL_POSITION: [f32; 3] = [5.0, 5.0, 5.0];

/// Collection of lights plus the clear color
#[derive(Debug, Clone)]
pub struct Scene {
    lights: Vec<Light>,
    pub background: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            background: Color::BLACK,
        }
    }

    pub fn add(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Total scalar irradiance for a world-space unit normal
    pub fn illuminance(&self, normal: &Vector3<f32>) -> f32 {
        self.lights.iter().map(|light| light.irradiance(normal)).sum()
    }

    /// Shade a surface color under every light in the scene
    pub fn shade(&self, base: Color, normal: &Vector3<f32>) -> Color {
        let incoming = self
            .lights
            .iter()
            .fold(Color::BLACK, |acc, light| acc + light.color().scale(light.irradiance(normal)));
        base.modulate(incoming)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Renderer parameters chosen at setup time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererSettings {
    pub antialias: bool,
    pub viewport: ViewportConfig,
}

/// Everything `create_scene` produces, ready for a host to draw
#[derive(Debug, Clone)]
pub struct SceneSetup {
    pub scene: Scene,
    pub camera: Camera,
    pub renderer: RendererSettings,
}

/// Build a fresh scene, camera and renderer settings for the given viewport
///
/// Each call returns an independent triple; nothing is shared with earlier
/// calls.
pub fn create_scene(viewport: ViewportConfig) -> SceneSetup {
    let mut camera = Camera::perspective(
        CAMERA_FOV_DEGREES,
        viewport.aspect(),
        CAMERA_NEAR,
        CAMERA_FAR,
    );
    let [cx, cy, cz] = CAMERA_POSITION;
    camera.set_position(cx, cy, cz);
    camera.look_at(0.0, 0.0, 0.0);

    let mut scene = Scene::new();
    scene.add(AmbientLight::new(Color::from_hex(0xffffff), AMBIENT_INTENSITY));
    let mut directional = DirectionalLight::new(Color::from_hex(0xffffff), DIRECTIONAL_INTENSITY);
    let [lx, ly, lz] = DIRECTIONAL_POSITION;
    directional.set_position(lx, ly, lz);
    scene.add(directional);

    log::debug!(
        "created scene {}x{} (aspect {:.3}, {} lights)",
        viewport.width,
        viewport.height,
        viewport.aspect(),
        scene.lights().len()
    );

    SceneSetup {
        scene,
        camera,
        renderer: RendererSettings {
            antialias: true,
            viewport,
        },
    }
}

/// A mesh with an orientation the drag controls can drive
#[derive(Debug, Clone)]
pub struct Object3D {
    pub mesh: Mesh,
    pub rotation: RotationState,
}

impl Object3D {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            rotation: RotationState::zero(),
        }
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::rotation_matrix(&self.rotation)
    }
}

impl Rotatable for Object3D {
    fn rotation_mut(&mut self) -> &mut RotationState {
        &mut self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_scene_defaults() {
        let setup = create_scene(ViewportConfig::default());
        assert_eq!(setup.renderer.viewport, ViewportConfig::new(400, 400));
        assert!((setup.camera.aspect - 1.0).abs() < 1e-6);
        assert!(setup.renderer.antialias);
    }

    #[test]
    fn test_create_scene_camera() {
        let setup = create_scene(ViewportConfig::new(800, 600));
        let camera = &setup.camera;
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.fov_degrees() - 75.0).abs() < 1e-4);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
        assert_eq!(camera.position, nalgebra::Point3::new(5.0, 5.0, 5.0));
        assert_eq!(camera.target, nalgebra::Point3::origin());
    }

    #[test]
    fn test_create_scene_lights() {
        let setup = create_scene(ViewportConfig::default());
        let lights = setup.scene.lights();
        assert_eq!(lights.len(), 2);

        match lights[0] {
            Light::Ambient(ambient) => {
                assert_eq!(ambient.color, Color::WHITE);
                assert_eq!(ambient.intensity, 0.5);
            }
            other => panic!("expected ambient light, got {:?}", other),
        }
        match lights[1] {
            Light::Directional(directional) => {
                assert_eq!(directional.color, Color::WHITE);
                assert_eq!(directional.intensity, 0.8);
                assert_eq!(directional.position, nalgebra::Point3::new(5.0, 5.0, 5.0));
            }
            other => panic!("expected directional light, got {:?}", other),
        }
    }

    #[test]
    fn test_illuminance_facing_and_away() {
        let setup = create_scene(ViewportConfig::default());
        let toward_light = Vector3::new(1.0, 1.0, 1.0).normalize();

        assert!((setup.scene.illuminance(&toward_light) - 1.3).abs() < 1e-6);
        assert!((setup.scene.illuminance(&-toward_light) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_shade_tints_base_color() {
        let setup = create_scene(ViewportConfig::default());
        let red = Color::rgb(1.0, 0.0, 0.0);
        let shaded = setup.scene.shade(red, &-Vector3::new(1.0, 1.0, 1.0).normalize());
        assert!((shaded.r - 0.5).abs() < 1e-6);
        assert_eq!(shaded.g, 0.0);
    }

    #[test]
    fn test_calls_are_independent() {
        let mut first = create_scene(ViewportConfig::default());
        let second = create_scene(ViewportConfig::default());
        first.camera.set_position(0.0, 0.0, 10.0);
        assert_eq!(second.camera.position, nalgebra::Point3::new(5.0, 5.0, 5.0));
    }
}
