/// Bindings and vertex inputs available to the custom shader pass.
///
/// Vertex sources receive a full-screen quad; both sources may declare any
/// subset of the group 0 bindings. Each source must contain exactly one entry
/// point for its stage.
pub const SHADER_PASS_INTERFACE: &str = r#"
struct Uniforms {
    cam_pos: vec3<f32>,
    aspect: f32,
    cam_dir: vec3<f32>,
    time: f32,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var t_diffuse: texture_2d<f32>;
@group(0) @binding(2) var s_diffuse: sampler;

// Vertex inputs: clip-space position (z = 0) and texture coordinates with
// (0, 0) at the top-left corner.
// @location(0) position: vec3<f32>
// @location(1) uv: vec2<f32>
"#;

/// WGSL shader copying the shader pass output onto the surface.
pub const BLIT_SHADER: &str = r#"
@group(0) @binding(0) var src_texture: texture_2d<f32>;
@group(0) @binding(1) var src_sampler: sampler;

struct BlitOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_blit(@location(0) position: vec3<f32>, @location(1) uv: vec2<f32>) -> BlitOutput {
    var out: BlitOutput;
    out.clip_position = vec4<f32>(position, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_blit(in: BlitOutput) -> @location(0) vec4<f32> {
    return textureSample(src_texture, src_sampler, in.uv);
}
"#;

/// WGSL shader for the reference grid.
pub const GRID_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

struct GridVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct GridOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_grid(vertex: GridVertex) -> GridOutput {
    var out: GridOutput;
    out.clip_position = scene.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_grid(in: GridOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
