use std::sync::{Arc, Mutex};

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wgpu::util::DeviceExt;

use super::quad::{QUAD_VERTEX_COUNT, QUAD_VERTICES, QuadVertex};
use super::surface;
use super::{Backend, GpuInit, GraphicsError, MappedTexture, RenderError, ResourceKind};

/// Format of the mirrored framebuffer texture. Matches `Color`'s in-memory layout.
pub const FRAME_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

/// wgpu implementation of [`Backend`].
///
/// Owns every GPU object needed to show the CPU framebuffer:
/// - device/queue and the surface (swapchain) bound to one window
/// - the framebuffer texture, its view, and a point/clamp sampler
/// - the fixed quad vertex buffer and the blit pipeline
/// - an upload buffer whose rows are padded to `COPY_BYTES_PER_ROW_ALIGNMENT`
pub struct WgpuBackend {
    /// Surface bound to the window. Holds the window alive through its `Arc`.
    surface: wgpu::Surface<'static>,

    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_info: wgpu::AdapterInfo,

    /// Active surface configuration (the render target).
    config: wgpu::SurfaceConfiguration,

    texture: wgpu::Texture,
    upload: wgpu::Buffer,
    row_pitch: u32,

    vertex_buffer: wgpu::Buffer,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    /// Set by the device-lost callback.
    lost: Arc<Mutex<Option<String>>>,

    /// Frame drawn by `draw` and waiting for `present`.
    pending: Option<wgpu::SurfaceTexture>,
}

impl WgpuBackend {
    /// Creates every GPU resource for a `width x height` surface on `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu. Each resource is
    /// created inside a validation error scope so a failure is reported as the
    /// matching `GraphicsError` variant rather than through the uncaptured error
    /// handler.
    pub async fn new<W>(
        window: Arc<W>,
        width: u32,
        height: u32,
        init: &GpuInit,
    ) -> Result<Self, GraphicsError>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        if width == 0 || height == 0 {
            return Err(GraphicsError::EmptySurface { width, height });
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| ResourceKind::Swapchain.error(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| ResourceKind::Adapter.error(e.to_string()))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "using adapter \"{}\" ({:?}, {:?})",
            adapter_info.name,
            adapter_info.backend,
            adapter_info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("px device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| ResourceKind::Device.error(e.to_string()))?;

        let lost = Arc::new(Mutex::new(None));
        {
            let lost = Arc::clone(&lost);
            device.set_device_lost_callback(move |reason, message| {
                log::error!("GPU device lost ({reason:?}): {message}");
                if let Ok(mut slot) = lost.lock() {
                    *slot = Some(format!("{reason:?}: {message}"));
                }
            });
        }
        device.on_uncaptured_error(Arc::new(|err: wgpu::Error| {
            log::error!("uncaptured wgpu error: {err}");
        }));

        // ── swapchain / render target ─────────────────────────────────────

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, init.prefer_srgb)
            .ok_or_else(|| ResourceKind::BackBuffer.error("surface reports no formats"))?;
        log::info!("presenting {width}x{height} as {format:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: init.present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        checked(&device, ResourceKind::RenderTarget, || {
            surface.configure(&device, &config)
        })
        .await?;

        // ── framebuffer texture ───────────────────────────────────────────

        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = checked(&device, ResourceKind::Texture, || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("px frame texture"),
                size: extent,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: FRAME_TEXTURE_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            })
        })
        .await?;

        let texture_view = checked(&device, ResourceKind::ShaderResourceView, || {
            texture.create_view(&wgpu::TextureViewDescriptor::default())
        })
        .await?;

        // ── shaders ───────────────────────────────────────────────────────

        let pixel_shader = checked(&device, ResourceKind::PixelShader, || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("px blit fragment shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit_fs.wgsl").into()),
            })
        })
        .await?;

        let vertex_shader = checked(&device, ResourceKind::VertexShader, || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("px blit vertex shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit_vs.wgsl").into()),
            })
        })
        .await?;

        // ── quad geometry ─────────────────────────────────────────────────

        let vertex_buffer = checked(&device, ResourceKind::VertexBuffer, || {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("px quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            })
        })
        .await?;

        // ── pipeline (input layout + bindings) ────────────────────────────

        let (pipeline, bind_group_layout) = checked(&device, ResourceKind::InputLayout, || {
            let bind_group_layout =
                device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("px blit bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                            count: None,
                        },
                    ],
                });

            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("px blit pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

            let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("px blit pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &vertex_shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[QuadVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &pixel_shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Cw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

            (pipeline, bind_group_layout)
        })
        .await?;

        let sampler = checked(&device, ResourceKind::Sampler, || {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("px point sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            })
        })
        .await?;

        let bind_group = checked(&device, ResourceKind::ShaderResourceView, || {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("px blit bind group"),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            })
        })
        .await?;

        // ── upload region ─────────────────────────────────────────────────

        let row_pitch = surface::padded_row_pitch(width);
        let upload = checked(&device, ResourceKind::UploadBuffer, || {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("px frame upload"),
                size: row_pitch as u64 * height as u64,
                usage: wgpu::BufferUsages::COPY_SRC | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        })
        .await?;
        log::debug!("upload row pitch {row_pitch} bytes for {} visible", width * 4);

        Ok(Self {
            surface,
            device,
            queue,
            adapter_info,
            config,
            texture,
            upload,
            row_pitch,
            vertex_buffer,
            pipeline,
            bind_group,
            lost,
            pending: None,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    /// Byte distance between rows of the upload region.
    pub fn row_pitch(&self) -> u32 {
        self.row_pitch
    }

    fn check_device(&self) -> Result<(), RenderError> {
        let reason = self.lost.lock().ok().and_then(|slot| slot.clone());
        match reason {
            Some(reason) => Err(RenderError::DeviceLost { reason }),
            None => Ok(()),
        }
    }
}

impl Backend for WgpuBackend {
    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn map(&mut self) -> Result<MappedTexture<'_>, RenderError> {
        self.check_device()?;

        let size = wgpu::BufferSize::new(self.upload.size())
            .ok_or_else(|| RenderError::Map("upload buffer is empty".into()))?;

        // The staging view is written back when dropped, before the next submit.
        let view = self
            .queue
            .write_buffer_with(&self.upload, 0, size)
            .ok_or_else(|| RenderError::Map("queue rejected the upload write".into()))?;

        Ok(MappedTexture::new(view, self.row_pitch as usize))
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        self.check_device()?;

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                if matches!(err, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) {
                    self.surface.configure(&self.device, &self.config);
                }
                self.check_device()?;
                return Err(RenderError::Present(err));
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("px frame encoder"),
            });

        encoder.copy_buffer_to_texture(
            wgpu::TexelCopyBufferInfo {
                buffer: &self.upload,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.row_pitch),
                    rows_per_image: Some(self.config.height),
                },
            },
            self.texture.as_image_copy(),
            wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
        );

        // Pass dropped before the encoder is finished.
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("px blit pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_viewport(
                0.0,
                0.0,
                self.config.width as f32,
                self.config.height as f32,
                0.0,
                1.0,
            );
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.pending = Some(frame);
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        if let Some(frame) = self.pending.take() {
            frame.present();
        }
        self.check_device()
    }
}

/// Runs `create` inside a validation error scope and tags a failure with `kind`.
async fn checked<T>(
    device: &wgpu::Device,
    kind: ResourceKind,
    create: impl FnOnce() -> T,
) -> Result<T, GraphicsError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    match scope.pop().await {
        Some(err) => {
            log::error!("{kind:?} creation failed: {err}");
            Err(kind.error(err.to_string()))
        }
        None => {
            log::debug!("{kind:?} created");
            Ok(value)
        }
    }
}
