use crate::arena::Arena;
use crate::render::{
    aligned_bytes_per_row, create_arena_sampler, create_arena_texture, create_render_bind_group,
    create_render_bind_group_layout,
};
use winit::window::Window;
use std::sync::Arc;

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub arena: Arena,
    // Tight RGBA bytes as the arena writes them, and the row-padded copy
    // that actually goes to the GPU.
    pub pixels: Vec<u8>,
    pub staging: Vec<u8>,
    pub bytes_per_row: u32,

    pub arena_texture: wgpu::Texture,
    pub render_pipeline: wgpu::RenderPipeline,
    pub render_bind_group: wgpu::BindGroup,
}

impl State {
    pub async fn new(window: Arc<Window>, arena: Arena) -> Self {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .expect("Failed to find an appropriate adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![surface_format.into()],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // The arena has a fixed side for the whole run; size every pixel
        // resource off it once, up front.
        let arena_side = arena.size() as u32;
        let pixels = vec![0u8; 4 * arena.size() * arena.size()];
        let bytes_per_row = aligned_bytes_per_row(arena_side);
        let staging = vec![0u8; (bytes_per_row * arena_side) as usize];

        let (arena_texture, arena_texture_view) = create_arena_texture(&device, arena_side);
        let arena_sampler = create_arena_sampler(&device);

        let render_shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Render Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../render.wgsl").into()),
        });

        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&render_bind_group_layout],
            push_constant_ranges: &[],
        });
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &render_shader_module,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &render_shader_module,
                entry_point: "fs_main",
                targets: &[Some(config.format.into())],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });
        let render_bind_group = create_render_bind_group(
            &device,
            &render_bind_group_layout,
            &arena_sampler,
            &arena_texture_view,
        );

        log::info!("wgpu initialized successfully.");

        Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            arena,
            pixels,
            staging,
            bytes_per_row,
            arena_texture,
            render_pipeline,
            render_bind_group,
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            // The arena keeps its side; the blit stretches to the new surface.
            log::info!(
                "Reconfigured surface to: {}x{}",
                new_size.width,
                new_size.height
            );
        } else {
            log::warn!(
                "Ignoring resize to zero dimensions: {}x{}",
                new_size.width,
                new_size.height
            );
        }
    }

    /// Advance the simulation (when `advance` is set), refresh the arena
    /// texture and present one frame.
    pub fn update_and_render(&mut self, advance: bool) -> Result<(), wgpu::SurfaceError> {
        if advance {
            self.arena.tick();
        }

        self.arena.draw(&mut self.pixels);

        // Repack the tight rows into the row-aligned staging buffer.
        let tight = 4 * self.arena.size();
        let pitch = self.bytes_per_row as usize;
        for (row, staged) in self
            .pixels
            .chunks_exact(tight)
            .zip(self.staging.chunks_exact_mut(pitch))
        {
            staged[..tight].copy_from_slice(row);
        }

        let arena_side = self.arena.size() as u32;
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.arena_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.staging,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(self.bytes_per_row),
                rows_per_image: Some(arena_side),
            },
            wgpu::Extent3d {
                width: arena_side,
                height: arena_side,
                depth_or_array_layers: 1,
            },
        );

        // --- Get Surface Texture (early exit on error) ---
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size); // Reconfigure the surface
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        // --- Render Pass ---
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut render_encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = render_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Draw full-screen triangle
        }
        self.queue.submit(Some(render_encoder.finish()));
        output_frame.present();

        Ok(())
    }
}
