use crate::context::GpuContext;
use crate::shaders;
use crate::uniforms::{
    CubeInstance, GridVertex, SceneUniforms, Vertex, cube_mesh, grid_mesh, pack_field,
};
use showroom_kernel::lights::field_instances;
use showroom_render::{Frame, GroundGrid, Renderer};
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_INSTANCES: u64 = 256;

/// Vertex buffer holding up to `capacity` elements of `stride` bytes; grows
/// to the next power of two when a frame needs more.
struct GrowableBuffer {
    buffer: wgpu::Buffer,
    capacity: u64,
    stride: u64,
    label: &'static str,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, stride: u64, capacity: u64) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity * stride,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity,
            stride,
            label,
        }
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        let needed = bytes.len() as u64 / self.stride;
        if needed > self.capacity {
            let capacity = needed.next_power_of_two();
            tracing::debug!(buffer = self.label, capacity, "growing instance buffer");
            *self = Self::new(device, self.label, self.stride, capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

struct PipelineSpec<'a> {
    label: &'a str,
    source: String,
    vs: &'a str,
    fs: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(spec.label),
        source: wgpu::ShaderSource::Wgsl(spec.source.into()),
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some(spec.vs),
            compilation_options: Default::default(),
            buffers: spec.buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some(spec.fs),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            cull_mode: spec.cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: spec.depth_write,
            depth_compare: spec.depth_compare,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

const MESH_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const CUBE_INSTANCE_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
];
const FIELD_INSTANCE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x4];
const GRID_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

const MESH_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &MESH_ATTRS,
};

const CUBE_INSTANCE_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<CubeInstance>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &CUBE_INSTANCE_ATTRS,
};

const FIELD_INSTANCE_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 4]>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &FIELD_INSTANCE_ATTRS,
};

const GRID_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<GridVertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &GRID_ATTRS,
};

/// wgpu renderer for showroom frames: sky, ground grid, lit cubes and the
/// instanced light field.
pub struct WgpuRenderer {
    sky_pipeline: wgpu::RenderPipeline,
    grid_pipeline: wgpu::RenderPipeline,
    cube_pipeline: wgpu::RenderPipeline,
    field_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    cube_instances: GrowableBuffer,
    field_instances: GrowableBuffer,
    field_key: Option<(u32, f32)>,
    grid_buffer: Option<(GroundGrid, wgpu::Buffer, u32)>,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_uniforms"),
            contents: bytemuck::bytes_of(&SceneUniforms::identity()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let sky_pipeline = build_pipeline(
            device,
            &layout,
            surface_format,
            PipelineSpec {
                label: "sky_pipeline",
                source: shaders::with_scene(shaders::SKY_WGSL),
                vs: "vs_sky",
                fs: "fs_sky",
                buffers: &[],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
            },
        );
        let grid_pipeline = build_pipeline(
            device,
            &layout,
            surface_format,
            PipelineSpec {
                label: "grid_pipeline",
                source: shaders::with_scene(shaders::GRID_WGSL),
                vs: "vs_grid",
                fs: "fs_grid",
                buffers: &[GRID_LAYOUT],
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        let cube_pipeline = build_pipeline(
            device,
            &layout,
            surface_format,
            PipelineSpec {
                label: "cube_pipeline",
                source: shaders::with_scene(shaders::CUBE_WGSL),
                vs: "vs_main",
                fs: "fs_main",
                buffers: &[MESH_LAYOUT, CUBE_INSTANCE_LAYOUT],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        let field_pipeline = build_pipeline(
            device,
            &layout,
            surface_format,
            PipelineSpec {
                label: "field_pipeline",
                source: shaders::with_scene(shaders::FIELD_WGSL),
                vs: "vs_field",
                fs: "fs_field",
                buffers: &[MESH_LAYOUT, FIELD_INSTANCE_LAYOUT],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        let (cube_verts, cube_indices) = cube_mesh();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            sky_pipeline,
            grid_pipeline,
            cube_pipeline,
            field_pipeline,
            uniform_buffer,
            uniform_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count: cube_indices.len() as u32,
            cube_instances: GrowableBuffer::new(
                device,
                "cube_instances",
                std::mem::size_of::<CubeInstance>() as u64,
                INITIAL_INSTANCES,
            ),
            field_instances: GrowableBuffer::new(
                device,
                "field_instances",
                std::mem::size_of::<[f32; 4]>() as u64,
                INITIAL_INSTANCES,
            ),
            field_key: None,
            grid_buffer: None,
            depth_texture: Self::create_depth_texture(device, width, height),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Draw one frame into `target`, clearing it first.
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        frame: &Frame,
        aspect: f32,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::from_frame(frame, aspect)),
        );

        let instances: Vec<CubeInstance> = frame.items.iter().map(CubeInstance::from).collect();
        self.cube_instances
            .write(device, queue, bytemuck::cast_slice(&instances));

        if let Some(field) = &frame.field {
            let key = (field.grid, field.spacing);
            if self.field_key != Some(key) {
                let packed = pack_field(&field_instances(field.grid, field.spacing));
                self.field_instances
                    .write(device, queue, bytemuck::cast_slice(&packed));
                self.field_key = Some(key);
                tracing::debug!(instances = packed.len(), "field instances uploaded");
            }
        }

        if let Some(grid) = frame.grid {
            let stale = self.grid_buffer.as_ref().is_none_or(|(g, _, _)| *g != grid);
            if stale {
                let verts = grid_mesh(grid.height, grid.extent, grid.spacing, grid.color);
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("grid_vertex_buffer"),
                    contents: bytemuck::cast_slice(&verts),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                self.grid_buffer = Some((grid, buffer, verts.len() as u32));
            }
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("showroom_encoder"),
        });

        {
            let c = frame.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: c.x as f64,
                            g: c.y as f64,
                            b: c.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if frame.sky.is_some() {
                pass.set_pipeline(&self.sky_pipeline);
                pass.draw(0..3, 0..1);
            }

            if frame.grid.is_some() {
                if let Some((_, buffer, count)) = &self.grid_buffer {
                    pass.set_pipeline(&self.grid_pipeline);
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..*count, 0..1);
                }
            }

            pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
            pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);

            if let Some(field) = &frame.field {
                pass.set_pipeline(&self.field_pipeline);
                pass.set_vertex_buffer(1, self.field_instances.buffer.slice(..));
                pass.draw_indexed(0..self.cube_index_count, 0, 0..field.instance_count());
            }

            if !instances.is_empty() {
                pass.set_pipeline(&self.cube_pipeline);
                pass.set_vertex_buffer(1, self.cube_instances.buffer.slice(..));
                pass.draw_indexed(0..self.cube_index_count, 0, 0..instances.len() as u32);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// Binds a [`WgpuRenderer`] to a surface texture so it can be driven
/// through the backend-agnostic [`Renderer`] trait.
pub struct SurfacePass<'a> {
    pub renderer: &'a mut WgpuRenderer,
    pub ctx: &'a GpuContext,
    pub target: &'a wgpu::TextureView,
}

impl Renderer for SurfacePass<'_> {
    type Output = ();

    fn render(&mut self, frame: &Frame) {
        let aspect = self.ctx.aspect();
        self.renderer
            .draw(&self.ctx.device, &self.ctx.queue, self.target, frame, aspect);
    }
}
