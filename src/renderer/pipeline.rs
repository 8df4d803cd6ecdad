//! WebGPU render pipeline
//!
//! One pipeline, one vertex buffer. The scene is rebuilt every frame in
//! playfield units; this module maps it to clip space and draws it.

use super::vertex::Vertex;
use super::viewport::Viewport;

/// Largest surface edge we ask for (WebGL2 downlevel texture limit)
pub const MAX_SURFACE_DIM: u32 = 2048;
/// Initial vertex capacity; a busy wave is a few thousand vertices
const INITIAL_VERTEX_CAPACITY: u64 = 4096;

#[derive(Debug, thiserror::Error)]
pub enum RenderInitError {
    #[error("could not open a device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no usable formats")]
    NoSurfaceFormat,
}

/// Scale `(width, height)` down so neither edge exceeds `max`, keeping the aspect ratio
pub fn clamp_surface_size(width: u32, height: u32, max: u32) -> (u32, u32) {
    let (width, height) = (width.max(1), height.max(1));
    let longest = width.max(height);
    if longest <= max {
        return (width, height);
    }
    let scale = max as f64 / longest as f64;
    (
        ((width as f64 * scale).round() as u32).clamp(1, max),
        ((height as f64 * scale).round() as u32).clamp(1, max),
    )
}

/// Palette colours are authored in sRGB already, so prefer a linear-storage format
fn preferred_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first())
        .copied()
}

/// Next power-of-two vertex capacity that fits `needed`
fn grown_capacity(current: u64, needed: u64) -> u64 {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two()
    }
}

fn vertex_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_vertices"),
        size: capacity * std::mem::size_of::<Vertex>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Vertices the buffer can hold
    vertex_capacity: u64,
    /// Clip-space copy of the last scene, reused between frames
    scratch: Vec<Vertex>,
    /// Playfield to canvas mapping
    pub viewport: Viewport,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderInitError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("benji-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let format = preferred_format(&caps.formats).ok_or(RenderInitError::NoSurfaceFormat)?;
        let (width, height) = clamp_surface_size(width, height, MAX_SURFACE_DIM);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("Surface {}x{} {:?}", width, height, format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        // Flat 2D triangles, back to front; no depth, no culling
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            scratch: Vec::with_capacity(INITIAL_VERTEX_CAPACITY as usize),
            viewport: Viewport::new(width, height),
        })
    }

    /// Reconfigure for a new drawing-buffer size (clamped to the surface limit)
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let (width, height) = clamp_surface_size(width, height, MAX_SURFACE_DIM);
        self.viewport = Viewport::new(width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame of playfield-space vertices over `background`
    pub fn render(
        &mut self,
        vertices: &[Vertex],
        background: [f32; 4],
    ) -> Result<(), wgpu::SurfaceError> {
        self.scratch.clear();
        self.scratch.extend(vertices.iter().map(|v| Vertex {
            position: self.viewport.to_ndc(v.position.into()),
            color: v.color,
        }));

        let needed = self.scratch.len() as u64;
        let capacity = grown_capacity(self.vertex_capacity, needed);
        if capacity != self.vertex_capacity {
            log::debug!("Growing vertex buffer {} -> {}", self.vertex_capacity, capacity);
            self.vertex_buffer = vertex_buffer(&self.device, capacity);
            self.vertex_capacity = capacity;
        }
        if needed > 0 {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.scratch));
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });

        {
            let [r, g, b, a] = background.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if needed > 0 {
                pass.set_pipeline(&self.pipeline);
                let bytes = needed * std::mem::size_of::<Vertex>() as u64;
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..bytes));
                pass.draw(0..needed as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
