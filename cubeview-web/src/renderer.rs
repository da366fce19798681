/// WebGL2 renderer drawing a flat-shaded object under the scene lights
use cubeview_core::{Camera, Light, Mesh, Object3D, RendererSettings, Scene};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlContextAttributes,
    WebGlProgram, WebGlShader, WebGlVertexArrayObject,
};

/// Directional lights beyond this count are ignored by the shader
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// position, normal, color
const FLOATS_PER_VERTEX: usize = 9;

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec3 a_color;

uniform mat4 u_model;
uniform mat4 u_view_projection;

out vec3 v_normal;
out vec3 v_color;

void main() {
    v_normal = mat3(u_model) * a_normal;
    v_color = a_color;
    gl_Position = u_view_projection * u_model * vec4(a_position, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec3 v_normal;
in vec3 v_color;

uniform vec3 u_ambient;
uniform vec3 u_light_dirs[4];
uniform vec3 u_light_colors[4];
uniform int u_light_count;

out vec4 out_color;

void main() {
    vec3 n = normalize(v_normal);
    vec3 light = u_ambient;
    for (int i = 0; i < 4; i++) {
        if (i >= u_light_count) {
            break;
        }
        light += u_light_colors[i] * max(dot(n, u_light_dirs[i]), 0.0);
    }
    out_color = vec4(v_color * light, 1.0);
}
"#;

/// Light parameters flattened for upload
#[derive(Debug, Clone, PartialEq)]
pub struct LightUniforms {
    /// Sum of every ambient light's color times intensity
    pub ambient: [f32; 3],
    /// Unit vectors toward each directional light, three floats per light
    pub directions: [f32; MAX_DIRECTIONAL_LIGHTS * 3],
    /// Color times intensity for each directional light
    pub colors: [f32; MAX_DIRECTIONAL_LIGHTS * 3],
    pub count: i32,
}

pub fn light_uniforms(scene: &Scene) -> LightUniforms {
    let mut uniforms = LightUniforms {
        ambient: [0.0; 3],
        directions: [0.0; MAX_DIRECTIONAL_LIGHTS * 3],
        colors: [0.0; MAX_DIRECTIONAL_LIGHTS * 3],
        count: 0,
    };

    for light in scene.lights() {
        match light {
            Light::Ambient(ambient) => {
                let c = ambient.color.scale(ambient.intensity).to_array();
                for (sum, channel) in uniforms.ambient.iter_mut().zip(c) {
                    *sum += channel;
                }
            }
            Light::Directional(directional) => {
                let slot = uniforms.count as usize;
                if slot >= MAX_DIRECTIONAL_LIGHTS {
                    log::warn!("ignoring directional light beyond {}", MAX_DIRECTIONAL_LIGHTS);
                    continue;
                }
                let dir = directional.to_light();
                uniforms.directions[slot * 3..slot * 3 + 3].copy_from_slice(&[dir.x, dir.y, dir.z]);
                uniforms.colors[slot * 3..slot * 3 + 3]
                    .copy_from_slice(&directional.color.scale(directional.intensity).to_array());
                uniforms.count += 1;
            }
        }
    }

    uniforms
}

/// Interleave mesh triangles as position, normal, color per vertex
pub fn vertex_data(mesh: &Mesh) -> Vec<f32> {
    let mut data = Vec::with_capacity(mesh.triangles.len() * 3 * FLOATS_PER_VERTEX);
    for triangle in &mesh.triangles {
        let normal = triangle.calculate_normal();
        let color = triangle.color.to_array();
        for vertex in &triangle.vertices {
            data.extend_from_slice(&[vertex.position.x, vertex.position.y, vertex.position.z]);
            data.extend_from_slice(&[normal.x, normal.y, normal.z]);
            data.extend_from_slice(&color);
        }
    }
    data
}

fn to_bytes(data: &[f32]) -> Vec<u8> {
    data.iter().flat_map(|value| value.to_le_bytes()).collect()
}

/// Canvas plus the GL objects needed to draw one object per frame
pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    gl: Gl,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
}

impl WebRenderer {
    /// Size the canvas and create an anti-aliased WebGL2 context on it
    pub fn new(canvas: HtmlCanvasElement, settings: &RendererSettings) -> Result<Self, JsValue> {
        canvas.set_width(settings.viewport.width);
        canvas.set_height(settings.viewport.height);

        let attributes = WebGlContextAttributes::new();
        attributes.set_antialias(settings.antialias);
        let gl = canvas
            .get_context_with_context_options("webgl2", &attributes)?
            .ok_or_else(|| JsValue::from_str("WebGL2 is not supported"))?
            .dyn_into::<Gl>()?;

        let vertex = compile_shader(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| JsValue::from_str("failed to create vertex array"))?;
        let buffer = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("failed to create buffer"))?;

        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
        let stride = (FLOATS_PER_VERTEX * 4) as i32;
        for (location, offset) in [(0u32, 0i32), (1, 12), (2, 24)] {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, 3, Gl::FLOAT, false, stride, offset);
        }
        gl.bind_vertex_array(None);

        gl.enable(Gl::DEPTH_TEST);
        gl.enable(Gl::CULL_FACE);

        log::debug!(
            "webgl2 renderer ready at {}x{}",
            settings.viewport.width,
            settings.viewport.height
        );

        Ok(Self {
            canvas,
            gl,
            program,
            vao,
            buffer,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Draw one frame of `object` seen from `camera`
    pub fn render(&self, scene: &Scene, camera: &Camera, object: &Object3D) {
        let gl = &self.gl;
        let [r, g, b] = scene.background.to_array();

        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        gl.clear_color(r, g, b, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program));

        let model = object.model_matrix();
        let view_projection = camera.view_projection_matrix();
        let uniform = |name: &str| gl.get_uniform_location(&self.program, name);
        gl.uniform_matrix4fv_with_f32_array(uniform("u_model").as_ref(), false, model.as_slice());
        gl.uniform_matrix4fv_with_f32_array(
            uniform("u_view_projection").as_ref(),
            false,
            view_projection.as_slice(),
        );

        let lights = light_uniforms(scene);
        gl.uniform3fv_with_f32_array(uniform("u_ambient").as_ref(), &lights.ambient);
        gl.uniform3fv_with_f32_array(uniform("u_light_dirs").as_ref(), &lights.directions);
        gl.uniform3fv_with_f32_array(uniform("u_light_colors").as_ref(), &lights.colors);
        gl.uniform1i(uniform("u_light_count").as_ref(), lights.count);

        let data = vertex_data(&object.mesh);
        gl.bind_vertex_array(Some(&self.vao));
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.buffer));
        gl.buffer_data_with_u8_array(Gl::ARRAY_BUFFER, &to_bytes(&data), Gl::DYNAMIC_DRAW);
        gl.draw_arrays(Gl::TRIANGLES, 0, (data.len() / FLOATS_PER_VERTEX) as i32);
        gl.bind_vertex_array(None);
    }
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| JsValue::from_str("failed to create shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".to_string());
        Err(JsValue::from_str(&info))
    }
}

fn link_program(gl: &Gl, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("failed to create program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown link error".to_string());
        Err(JsValue::from_str(&info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_core::{create_scene, ViewportConfig};

    #[test]
    fn test_default_scene_uniforms() {
        let setup = create_scene(ViewportConfig::default());
        let lights = light_uniforms(&setup.scene);

        assert_eq!(lights.ambient, [0.5, 0.5, 0.5]);
        assert_eq!(lights.count, 1);

        let d = 1.0 / 3.0f32.sqrt();
        for (actual, expected) in lights.directions[..3].iter().zip([d, d, d]) {
            assert!((actual - expected).abs() < 1e-6);
        }
        assert_eq!(&lights.colors[..3], &[0.8, 0.8, 0.8]);
    }

    #[test]
    fn test_vertex_data_layout() {
        let mesh = Mesh::cube(2.0);
        let data = vertex_data(&mesh);
        assert_eq!(data.len(), 12 * 3 * FLOATS_PER_VERTEX);

        // First vertex normal matches the face normal of the first triangle
        let normal = mesh.triangles[0].calculate_normal();
        assert_eq!(&data[3..6], &[normal.x, normal.y, normal.z]);
        assert_eq!(&data[6..9], &mesh.triangles[0].color.to_array());
    }

    #[test]
    fn test_to_bytes_is_little_endian() {
        assert_eq!(to_bytes(&[1.0]), 1.0f32.to_le_bytes().to_vec());
    }
}
