//! Forward scene pipeline
//!
//! One pipeline draws the whole scene. Per-frame data (projection `P`,
//! view `V`, lighting) lives in a uniform buffer written once per frame;
//! per-draw data (model `M`, color) is packed into a dynamic-offset
//! uniform buffer, one aligned slot per draw command.

use arachne_math::Mat4;
use wgpu::util::DeviceExt;

use crate::mesh::{MeshKey, MeshRegistry, MeshVertex};

/// Uniform buffer offset alignment for the per-draw slots
const DRAW_STRIDE: u64 = 256;

/// Per-frame uniforms (matches `FrameUniforms` in scene.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Projection matrix ("P")
    pub projection: Mat4,
    /// View matrix ("V")
    pub view: Mat4,
    /// Directional light, world space
    pub light_dir: [f32; 3],
    /// Ambient light strength
    pub ambient: f32,
    /// Diffuse light strength
    pub diffuse: f32,
    pub _padding: [f32; 3],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            projection: arachne_math::mat4::IDENTITY,
            view: arachne_math::mat4::IDENTITY,
            light_dir: [0.5, 1.0, 0.3],
            ambient: 0.3,
            diffuse: 0.7,
            _padding: [0.0; 3],
        }
    }
}

/// Per-draw uniforms (matches `DrawUniforms` in scene.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    /// Model matrix ("M")
    model: Mat4,
    color: [f32; 4],
}

/// One mesh drawn with one model matrix and color
#[derive(Clone, Copy, Debug)]
pub struct DrawCommand {
    pub mesh: MeshKey,
    pub model: Mat4,
    pub color: [f32; 4],
}

/// Forward pipeline with fill and (optional) wireframe variants
pub struct ScenePipeline {
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: wgpu::BindGroupLayout,
    frame_buffer: wgpu::Buffer,
    draw_buffer: wgpu::Buffer,
    draw_capacity: u64,
    bind_group: wgpu::BindGroup,
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
    commands: Vec<DrawCommand>,
}

impl ScenePipeline {
    /// Create the pipeline for the given surface format
    ///
    /// `with_wireframe` requires the device to have been created with the
    /// line polygon mode feature.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        with_wireframe: bool,
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[
                // Frame uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Per-draw uniforms, one aligned slot per draw
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<DrawUniforms>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader_source = include_str!("shaders/scene.wgsl");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let make_pipeline = |polygon_mode: wgpu::PolygonMode| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Scene Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[MeshVertex::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    unclipped_depth: false,
                    polygon_mode,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        let fill_pipeline = make_pipeline(wgpu::PolygonMode::Fill);
        let line_pipeline = with_wireframe.then(|| make_pipeline(wgpu::PolygonMode::Line));

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::bytes_of(&FrameUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let draw_capacity = 16;
        let draw_buffer = Self::create_draw_buffer(device, draw_capacity);
        let bind_group =
            Self::create_bind_group(device, &bind_group_layout, &frame_buffer, &draw_buffer);

        Self {
            fill_pipeline,
            line_pipeline,
            bind_group_layout,
            frame_buffer,
            draw_buffer,
            draw_capacity,
            bind_group,
            depth_texture: None,
            depth_size: (0, 0),
            commands: Vec::new(),
        }
    }

    fn create_draw_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw Uniform Buffer"),
            size: capacity * DRAW_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        frame_buffer: &wgpu::Buffer,
        draw_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: draw_buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniforms>() as u64),
                    }),
                },
            ],
        })
    }

    /// Ensure depth texture exists and matches the surface size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Depth32Float,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            self.depth_texture =
                Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Upload per-frame uniforms and clear the draw list
    pub fn begin_frame(&mut self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(uniforms));
        self.commands.clear();
    }

    /// Queue one draw for this frame
    pub fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Number of draws queued so far this frame
    pub fn queued_draws(&self) -> usize {
        self.commands.len()
    }

    /// Upload the draw list and encode the render pass
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        meshes: &MeshRegistry,
        clear_color: wgpu::Color,
        wireframe: bool,
    ) {
        // Grow the per-draw buffer if this frame queued more draws than ever
        let needed = self.commands.len() as u64;
        if needed > self.draw_capacity {
            self.draw_capacity = needed.next_power_of_two();
            self.draw_buffer = Self::create_draw_buffer(device, self.draw_capacity);
            self.bind_group = Self::create_bind_group(
                device,
                &self.bind_group_layout,
                &self.frame_buffer,
                &self.draw_buffer,
            );
        }

        for (i, command) in self.commands.iter().enumerate() {
            let uniforms = DrawUniforms {
                model: command.model,
                color: command.color,
            };
            queue.write_buffer(
                &self.draw_buffer,
                i as u64 * DRAW_STRIDE,
                bytemuck::bytes_of(&uniforms),
            );
        }

        let depth_view = self
            .depth_texture
            .as_ref()
            .expect("Depth texture not created. Call ensure_depth_texture first.");

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let pipeline = if wireframe {
            self.line_pipeline.as_ref().unwrap_or(&self.fill_pipeline)
        } else {
            &self.fill_pipeline
        };
        render_pass.set_pipeline(pipeline);

        for (i, command) in self.commands.iter().enumerate() {
            let Some(mesh) = meshes.get(command.mesh) else {
                log::warn!("Draw command references unknown mesh; skipping");
                continue;
            };
            let offset = (i as u64 * DRAW_STRIDE) as u32;
            render_pass.set_bind_group(0, &self.bind_group, &[offset]);
            mesh.draw(&mut render_pass);
        }
    }
}
