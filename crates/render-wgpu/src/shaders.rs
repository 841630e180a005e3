/// WGSL vertex shader: transforms walk points by model, view and projection.
pub const LINE_VERTEX_SHADER: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_line(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.projection * uniforms.view * uniforms.model * vec4<f32>(position, 1.0);
}
"#;

/// WGSL fragment shader: flat per-walk line color.
pub const LINE_FRAGMENT_SHADER: &str = r#"
struct LineStyle {
    color: vec4<f32>,
};

@group(1) @binding(0)
var<uniform> style: LineStyle;

@fragment
fn fs_line() -> @location(0) vec4<f32> {
    return style.color;
}
"#;
