use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::animator::SceneAnimator;
use crate::geometry::ShapeKind;
use crate::hud::{Hud, HudStats};
use crate::types::{CameraUniform, InstanceData, LightUniform, Vertex};
use crate::window::Viewport;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Faces culled by each pass of a shape, in draw order: back faces first,
/// then front faces blend over them
pub const CULL_PASSES: [wgpu::Face; 2] = [wgpu::Face::Front, wgpu::Face::Back];

/// Vertex and index buffers of one shape kind
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Draws the animator's scene into a window surface
pub struct ShapeRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    /// One pipeline per entry of `CULL_PASSES`
    pipelines: Vec<wgpu::RenderPipeline>,
    bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    meshes: Vec<GpuMesh>,
    hud: Option<Hud>,
}

impl ShapeRenderer {
    pub async fn new(window: Arc<Window>, animator: &SceneAnimator, show_hud: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        info!("Using adapter: {}", adapter.get_info().name);
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size)?;
        surface.configure(&device, &surface_config);

        let depth_view = Self::create_depth_view(&device, surface_config.width, surface_config.height);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[animator.camera().to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[animator.scene().lighting.to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Shape count never changes, so the instance buffer is sized once
        let instance_capacity = animator.scene().len();
        let instance_bytes = (instance_capacity.max(1) * std::mem::size_of::<InstanceData>()) as u64;
        let max_buffer_size = device.limits().max_buffer_size;
        if instance_bytes > max_buffer_size {
            bail!(
                "{} shapes need a {} byte instance buffer, device allows {}",
                instance_capacity,
                instance_bytes,
                max_buffer_size
            );
        }
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: instance_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let meshes = ShapeKind::ALL
            .iter()
            .map(|kind| Self::upload_mesh(&device, *kind))
            .collect();

        let (pipelines, bind_group) = Self::create_pipelines(
            &device,
            &camera_buffer,
            &light_buffer,
            surface_config.format,
        );

        let hud = show_hud.then(|| Hud::new(&window, &device, surface_config.format));

        info!(
            "Renderer initialized: {}x{}, {} instances",
            surface_config.width, surface_config.height, instance_capacity
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            depth_view,
            pipelines,
            bind_group,
            camera_buffer,
            light_buffer,
            instance_buffer,
            instance_capacity,
            meshes,
            hud,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("failed to find an appropriate adapter: {:?}", e))
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Shape Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| anyhow!("failed to create device: {:?}", e))
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn upload_mesh(device: &wgpu::Device, kind: ShapeKind) -> GpuMesh {
        let mesh = kind.mesh();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertices", kind.name())),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Indices", kind.name())),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    fn create_pipelines(
        device: &wgpu::Device,
        camera_buffer: &wgpu::Buffer,
        light_buffer: &wgpu::Buffer,
        surface_format: wgpu::TextureFormat,
    ) -> (Vec<wgpu::RenderPipeline>, wgpu::BindGroup) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shapes.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
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
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
            label: Some("shape_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
            label: Some("shape_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipelines = CULL_PASSES
            .iter()
            .map(|&cull| Self::create_pipeline(device, &shader, &pipeline_layout, surface_format, cull))
            .collect();

        (pipelines, bind_group)
    }

    fn create_pipeline(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
        cull: wgpu::Face,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(if cull == wgpu::Face::Front {
                "Shape Back Face Pipeline"
            } else {
                "Shape Front Face Pipeline"
            }),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout(), InstanceData::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The shader flips back-face normals
                cull_mode: Some(cull),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
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
    }

    /// Reconfigure the surface for a new size; zero sizes are ignored
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.surface_config.width = viewport.width;
        self.surface_config.height = viewport.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_view(&self.device, viewport.width, viewport.height);
    }

    /// Reconfigure with the current size, after the surface was lost or outdated
    pub fn reconfigure(&mut self) {
        self.resize(self.viewport());
    }

    /// Current surface dimensions
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.surface_config.width, self.surface_config.height)
    }

    /// Let the HUD see the event first; true when it consumed it
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        match &mut self.hud {
            Some(hud) => hud.handle_event(window, event),
            None => false,
        }
    }

    pub fn render(
        &mut self,
        animator: &SceneAnimator,
        window: &Window,
        stats: &HudStats,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let camera = animator.camera();
        let camera_uniform: CameraUniform = camera.to_uniform();
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));
        let light_uniform: LightUniform = animator.scene().lighting.to_uniform();
        self.queue
            .write_buffer(&self.light_buffer, 0, bytemuck::cast_slice(&[light_uniform]));

        let draws = animator.scene().instances_back_to_front(camera.position);
        let draws = &draws[..draws.len().min(self.instance_capacity)];
        let instances: Vec<InstanceData> = draws.iter().map(|(_, inst)| *inst).collect();
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Shape Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shape Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(animator.scene().background.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            for (i, (kind, _)) in draws.iter().enumerate() {
                let mesh = &self.meshes[kind.index()];
                let i = i as u32;
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                for pipeline in &self.pipelines {
                    render_pass.set_pipeline(pipeline);
                    render_pass.draw_indexed(0..mesh.index_count, 0, i..i + 1);
                }
            }
        }

        let mut command_buffers = Vec::new();
        if let Some(hud) = &mut self.hud {
            let size = [self.surface_config.width, self.surface_config.height];
            command_buffers = hud.draw(&self.device, &self.queue, &mut encoder, &view, window, size, stats);
        }

        command_buffers.push(encoder.finish());
        self.queue.submit(command_buffers);
        output.present();

        Ok(())
    }
}
