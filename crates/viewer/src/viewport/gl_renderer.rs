use glow::HasContext;

use whiplab_stl::MeshGeometry;

use super::camera::OrbitCamera;
use super::controls::ModelSpin;

// ── Render parameters ────────────────────────────────────────

/// Parameters for rendering the viewport
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    /// Background color RGB
    pub bg_color: [u8; 3],
}

// ── GPU mesh handle ──────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: i32,
}

// ── Main GL renderer ─────────────────────────────────────────

pub struct GlRenderer {
    program: glow::Program,
    /// The single resident part mesh
    mesh: Option<GpuMesh>,
    /// Version counter to detect mesh replacement
    last_mesh_version: u64,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Self {
        let program = compile_program(gl, MESH_VERT, MESH_FRAG);
        Self {
            program,
            mesh: None,
            last_mesh_version: 0,
        }
    }

    /// Upload the session mesh when its version changes. The previous GPU
    /// mesh is deleted before the replacement is uploaded, so at most one
    /// mesh is ever resident.
    pub fn sync_mesh(&mut self, gl: &glow::Context, mesh: Option<&MeshGeometry>, version: u64) {
        if version == self.last_mesh_version {
            return;
        }
        self.last_mesh_version = version;

        if let Some(old) = self.mesh.take() {
            unsafe {
                gl.delete_vertex_array(old.vao);
                gl.delete_buffer(old.vbo);
            }
        }

        if let Some(data) = mesh {
            if !data.is_empty() {
                self.mesh = Some(upload_mesh(gl, data));
            }
        }
    }

    /// Render the current mesh
    pub fn paint(
        &self,
        gl: &glow::Context,
        camera: &OrbitCamera,
        spin: &ModelSpin,
        params: &RenderParams,
    ) {
        let aspect = params.viewport[2] / params.viewport[3];
        let vp = camera.view_projection(aspect);
        let model = spin.model_matrix();

        unsafe {
            gl.viewport(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.scissor(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.enable(glow::SCISSOR_TEST);

            // Clear viewport area with the theme background color
            gl.clear_color(
                params.bg_color[0] as f32 / 255.0,
                params.bg_color[1] as f32 / 255.0,
                params.bg_color[2] as f32 / 255.0,
                1.0,
            );
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            if let Some(mesh) = &self.mesh {
                gl.enable(glow::DEPTH_TEST);
                gl.depth_func(glow::LESS);

                gl.use_program(Some(self.program));
                set_uniform_mat4(gl, self.program, "u_vp", &vp);
                set_uniform_mat4(gl, self.program, "u_model", &model);

                // Light direction in world space
                let light_dir = glam::Vec3::new(0.3, 0.8, 0.5).normalize();
                set_uniform_vec3(gl, self.program, "u_light_dir", &light_dir);

                gl.bind_vertex_array(Some(mesh.vao));
                gl.draw_arrays(glow::TRIANGLES, 0, mesh.vertex_count);
                gl.bind_vertex_array(None);

                gl.disable(glow::DEPTH_TEST);
            }

            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
            if let Some(mesh) = &self.mesh {
                gl.delete_vertex_array(mesh.vao);
                gl.delete_buffer(mesh.vbo);
            }
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

/// Interleave the parallel position/normal buffers into a single
/// 6-float-stride vertex buffer and upload it.
fn upload_mesh(gl: &glow::Context, data: &MeshGeometry) -> GpuMesh {
    let vertex_count = data.vertex_count();
    let mut vertices = Vec::with_capacity(vertex_count * 6);
    for i in 0..vertex_count {
        let base = i * 3;
        vertices.extend_from_slice(&data.positions[base..base + 3]);
        vertices.extend_from_slice(&data.normals[base..base + 3]);
    }

    unsafe {
        let vao = gl.create_vertex_array().unwrap();
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            as_byte_slice(&vertices),
            glow::STATIC_DRAW,
        );

        let stride = 6 * 4; // 6 floats * 4 bytes
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);

        gl.bind_vertex_array(None);

        GpuMesh {
            vao,
            vbo,
            vertex_count: vertex_count as i32,
        }
    }
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> glow::Program {
    unsafe {
        let program = gl.create_program().unwrap();

        let vert = gl.create_shader(glow::VERTEX_SHADER).unwrap();
        gl.shader_source(vert, vert_src);
        gl.compile_shader(vert);
        if !gl.get_shader_compile_status(vert) {
            let log = gl.get_shader_info_log(vert);
            tracing::error!("Vertex shader error: {log}");
        }

        let frag = gl.create_shader(glow::FRAGMENT_SHADER).unwrap();
        gl.shader_source(frag, frag_src);
        gl.compile_shader(frag);
        if !gl.get_shader_compile_status(frag) {
            let log = gl.get_shader_info_log(frag);
            tracing::error!("Fragment shader error: {log}");
        }

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            tracing::error!("Program link error: {log}");
        }

        gl.delete_shader(vert);
        gl.delete_shader(frag);

        program
    }
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: &glam::Vec3) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn as_byte_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            slice.as_ptr() as *const u8,
            std::mem::size_of_val(slice),
        )
    }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_vp;
uniform mat4 u_model;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

out vec3 v_normal;

void main() {
    gl_Position = u_vp * u_model * vec4(a_position, 1.0);
    v_normal = mat3(u_model) * a_normal;
}
"#;

const MESH_FRAG: &str = r#"#version 330 core
uniform vec3 u_light_dir;

in vec3 v_normal;

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    float diffuse = max(dot(n, u_light_dir), 0.0);
    float ambient = 0.25;
    float light = ambient + diffuse * 0.75;
    vec3 base = vec3(0.70, 0.70, 0.72);
    frag_color = vec4(base * light, 1.0);
}
"#;
