//! wgpu render device
//!
//! Every transform uniform gets its own bind group at group 0; textures bind
//! at group 1. Draws are recorded during the frame and replayed into a single
//! render pass at `present`, each one setting its own pipeline.

use std::sync::Arc;

use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::device::*;
use super::vertex::{Vertex, colors};
use crate::error::RenderError;
use crate::transform::Viewport;

struct GpuBuffer {
    buffer: wgpu::Buffer,
    /// Vertices the buffer can hold
    capacity: usize,
    /// Vertices last written
    len: usize,
}

struct GpuUniform {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct GpuTexture {
    // Kept alive for the bind group
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

struct GpuPipeline {
    pipeline: wgpu::RenderPipeline,
    shader: ShaderKind,
    label: String,
}

/// Render device backed by a wgpu surface
pub struct GpuDevice {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    wireframe_supported: bool,

    transform_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    color_layout: wgpu::PipelineLayout,
    textured_layout: wgpu::PipelineLayout,
    color_shader: wgpu::ShaderModule,
    textured_shader: wgpu::ShaderModule,
    sampler: wgpu::Sampler,

    buffers: ResourcePool<GpuBuffer>,
    uniforms: ResourcePool<GpuUniform>,
    textures: ResourcePool<GpuTexture>,
    pipelines: ResourcePool<GpuPipeline>,
    pending: Vec<DrawCall>,
}

impl GpuDevice {
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::SurfaceCreation(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::AdapterUnavailable(e.to_string()))?;

        let info = adapter.get_info();
        log::info!("Adapter: {} ({:?})", info.name, info.backend);

        let wireframe_supported = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if wireframe_supported {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("paddleball-device"),
                required_features,
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| RenderError::DeviceRequest(e.to_string()))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {}x{} {:?} vsync={}",
            width,
            height,
            surface_format,
            vsync
        );

        let color_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("color_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("color.wgsl").into()),
        });
        let textured_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("textured_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("textured.wgsl").into()),
        });

        let transform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("transform_layout"),
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

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let color_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("color_pipeline_layout"),
            bind_group_layouts: &[&transform_layout],
            immediate_size: 0,
        });
        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_pipeline_layout"),
            bind_group_layouts: &[&transform_layout, &texture_layout],
            immediate_size: 0,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("clamp_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            wireframe_supported,
            transform_layout,
            texture_layout,
            color_layout,
            textured_layout,
            color_shader,
            textured_shader,
            sampler,
            buffers: ResourcePool::new(BufferHandle::KIND),
            uniforms: ResourcePool::new(UniformHandle::KIND),
            textures: ResourcePool::new(TextureHandle::KIND),
            pipelines: ResourcePool::new(PipelineHandle::KIND),
            pending: Vec::new(),
        })
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn new_vertex_buffer(&self, label: &str, vertices: &[Vertex]) -> wgpu::Buffer {
        // A zero-sized buffer cannot be bound, keep at least one vertex
        let placeholder = [Vertex::colored(0.0, 0.0, 0.0, [0.0; 4])];
        let contents = if vertices.is_empty() {
            &placeholder[..]
        } else {
            vertices
        };
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(contents),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
    }
}

fn topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        Topology::LineList => wgpu::PrimitiveTopology::LineList,
    }
}

fn cull_face(cull: CullMode) -> Option<wgpu::Face> {
    match cull {
        CullMode::None => None,
        CullMode::Front => Some(wgpu::Face::Front),
        CullMode::Back => Some(wgpu::Face::Back),
    }
}

impl RenderDevice for GpuDevice {
    fn viewport(&self) -> Viewport {
        Viewport::from_pixels(self.config.width, self.config.height)
    }

    fn create_vertex_buffer(
        &mut self,
        label: &str,
        vertices: &[Vertex],
    ) -> Result<BufferHandle, RenderError> {
        let buffer = self.new_vertex_buffer(label, vertices);
        let index = self.buffers.insert(GpuBuffer {
            buffer,
            capacity: vertices.len().max(1),
            len: vertices.len(),
        });
        Ok(BufferHandle(index))
    }

    fn write_vertex_buffer(
        &mut self,
        handle: BufferHandle,
        vertices: &[Vertex],
    ) -> Result<(), RenderError> {
        let capacity = self.buffers.get(handle.index())?.capacity;
        if vertices.len() > capacity {
            let buffer = self.new_vertex_buffer("vertex_buffer", vertices);
            let slot = self.buffers.get_mut(handle.index())?;
            slot.buffer = buffer;
            slot.capacity = vertices.len();
            slot.len = vertices.len();
            return Ok(());
        }

        let slot = self.buffers.get_mut(handle.index())?;
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&slot.buffer, 0, bytemuck::cast_slice(vertices));
        }
        slot.len = vertices.len();
        Ok(())
    }

    fn create_uniform_buffer(&mut self, label: &str) -> Result<UniformHandle, RenderError> {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(&Mat4::IDENTITY),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Ok(UniformHandle(
            self.uniforms.insert(GpuUniform { buffer, bind_group }),
        ))
    }

    fn write_transform(
        &mut self,
        handle: UniformHandle,
        transform: &Mat4,
    ) -> Result<(), RenderError> {
        let uniform = self.uniforms.get(handle.index())?;
        self.queue
            .write_buffer(&uniform.buffer, 0, bytemuck::bytes_of(transform));
        Ok(())
    }

    fn create_texture(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<TextureHandle, RenderError> {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        Ok(TextureHandle(self.textures.insert(GpuTexture {
            _texture: texture,
            bind_group,
        })))
    }

    fn create_pipeline(&mut self, desc: &PipelineDesc) -> Result<PipelineHandle, RenderError> {
        let (layout, shader) = match desc.shader {
            ShaderKind::Color => (&self.color_layout, &self.color_shader),
            ShaderKind::Textured => (&self.textured_layout, &self.textured_shader),
        };

        let polygon_mode = match desc.raster.fill {
            FillMode::Solid => wgpu::PolygonMode::Fill,
            FillMode::Wireframe if self.wireframe_supported => wgpu::PolygonMode::Line,
            FillMode::Wireframe => {
                log::warn!("Wireframe unsupported, '{}' falls back to solid fill", desc.label);
                wgpu::PolygonMode::Fill
            }
        };

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(&desc.label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::desc()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: topology(desc.topology),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: cull_face(desc.raster.cull),
                    polygon_mode,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        log::debug!("Pipeline '{}' created", desc.label);
        Ok(PipelineHandle(self.pipelines.insert(GpuPipeline {
            pipeline,
            shader: desc.shader,
            label: desc.label.clone(),
        })))
    }

    fn draw(&mut self, call: DrawCall) -> Result<(), RenderError> {
        if call.vertex_count == 0 {
            return Ok(());
        }
        let pipeline = self.pipelines.get(call.pipeline.index())?;
        self.buffers.get(call.vertices.index())?;
        self.uniforms.get(call.transform.index())?;
        pipeline
            .shader
            .check_texture(&pipeline.label, call.texture)?;
        if let Some(texture) = call.texture {
            self.textures.get(texture.index())?;
        }
        self.pending.push(call);
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.pending.clear();
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let draws = std::mem::take(&mut self.pending);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring and dropping frame");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => {
                log::warn!("Skipping frame: {:?}", e);
                return Ok(());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for call in &draws {
                // Resources may have been released after the draw was queued
                let (Ok(pipeline), Ok(buffer), Ok(uniform)) = (
                    self.pipelines.get(call.pipeline.index()),
                    self.buffers.get(call.vertices.index()),
                    self.uniforms.get(call.transform.index()),
                ) else {
                    log::warn!("Dropping draw with released resources");
                    continue;
                };

                render_pass.set_pipeline(&pipeline.pipeline);
                render_pass.set_bind_group(0, &uniform.bind_group, &[]);
                if pipeline.shader == ShaderKind::Textured {
                    let Some(texture) = call
                        .texture
                        .and_then(|t| self.textures.get(t.index()).ok())
                    else {
                        log::warn!("Dropping textured draw without a texture");
                        continue;
                    };
                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                }
                render_pass.set_vertex_buffer(0, buffer.buffer.slice(..));
                let count = call.vertex_count.min(buffer.len as u32);
                render_pass.draw(0..count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn resize_targets(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
            log::info!("Surface resized to {}x{}", width, height);
        }
    }

    fn release(&mut self, resource: Resource) -> Result<(), RenderError> {
        match resource {
            Resource::Buffer(h) => self.buffers.remove(h.index()).map(|b| b.buffer.destroy()),
            Resource::Uniform(h) => self.uniforms.remove(h.index()).map(|u| u.buffer.destroy()),
            Resource::Texture(h) => self.textures.remove(h.index()).map(drop),
            Resource::Pipeline(h) => self.pipelines.remove(h.index()).map(drop),
        }
    }
}
