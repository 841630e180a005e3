use crate::camera::OrbitCamera;
use crate::error::InitError;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use randomwalk_walk::WalkScene;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl Uniforms {
    fn from_camera(camera: &OrbitCamera) -> Self {
        Self {
            model: camera.model_matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineStyle {
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineVertex {
    position: [f32; 3],
}

/// GPU resources for one walk. The vertex buffer holds the whole walk;
/// draws use only the revealed prefix.
struct LineStrip {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    style_bind_group: wgpu::BindGroup,
}

/// wgpu-based walk renderer.
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    strips: Vec<LineStrip>,
}

/// Create a shader module, turning validation errors into `InitError`.
fn compile_shader(
    device: &wgpu::Device,
    label: &'static str,
    source: &'static str,
) -> Result<wgpu::ShaderModule, InitError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(InitError::ShaderCompile {
            label,
            log: err.to_string(),
        }),
        None => Ok(module),
    }
}

impl LineRenderer {
    /// Compile the shaders, build the pipeline and upload every walk in `scene`.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        scene: &WalkScene,
    ) -> Result<Self, InitError> {
        let vertex_shader = compile_shader(device, "line_vertex_shader", shaders::LINE_VERTEX_SHADER)?;
        let fragment_shader =
            compile_shader(device, "line_fragment_shader", shaders::LINE_FRAGMENT_SHADER)?;

        // Uniform buffer
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                view: Mat4::IDENTITY.to_cols_array_2d(),
                projection: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let style_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("style_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &style_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: Some("vs_line"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_shader,
                entry_point: Some("fs_line"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(InitError::PipelineLink {
                log: err.to_string(),
            });
        }

        let strips = scene
            .walks()
            .iter()
            .enumerate()
            .map(|(i, walk)| {
                let vertices: Vec<LineVertex> = walk
                    .trajectory
                    .points()
                    .iter()
                    .map(|p| LineVertex {
                        position: p.to_array(),
                    })
                    .collect();
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("walk_vertex_buffer_{i}")),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });

                let style_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("walk_style_buffer_{i}")),
                    contents: bytemuck::bytes_of(&LineStyle {
                        color: walk.color.to_rgba(),
                    }),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
                let style_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("walk_style_bind_group_{i}")),
                    layout: &style_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: style_buffer.as_entire_binding(),
                    }],
                });

                LineStrip {
                    vertex_buffer,
                    vertex_count: vertices.len() as u32,
                    style_bind_group,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!("uploaded {} walk vertex buffers", strips.len());

        Ok(Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            strips,
        })
    }

    /// Number of uploaded walks.
    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }

    /// Render one frame: the revealed prefix of every walk.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbitCamera,
        scene: &WalkScene,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::from_camera(camera)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("walk_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            let revealed = u32::try_from(scene.revealed()).unwrap_or(u32::MAX);
            for strip in &self.strips {
                let count = revealed.min(strip.vertex_count);
                // A strip needs two points before anything is visible.
                if count < 2 {
                    continue;
                }
                pass.set_bind_group(1, &strip.style_bind_group, &[]);
                pass.set_vertex_buffer(0, strip.vertex_buffer.slice(..));
                pass.draw(0..count, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}
