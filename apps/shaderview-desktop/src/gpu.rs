use crate::overlay::Overlay;
use anyhow::{Context, Result};
use shaderview_assets::ShaderSources;
use shaderview_render::{Compositor, Frame, Viewport};
use shaderview_render_wgpu::{RenderError, RendererOptions, ShaderPassRenderer};
use std::sync::Arc;
use winit::window::Window;

/// Window surface plus the render passes and overlay drawn onto it.
pub struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: ShaderPassRenderer,
    pub overlay: Overlay,
}

impl Gpu {
    pub fn new(
        window: Arc<Window>,
        viewport: &Viewport,
        sources: &ShaderSources,
        options: RendererOptions,
        show_overlay: bool,
    ) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("shaderview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        // Shader output is written as-is, without sRGB encoding.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let (bw, bh) = viewport.drawing_buffer_size();
        let renderer = ShaderPassRenderer::new(&device, surface_format, sources, bw, bh, options)?;
        let overlay = Overlay::new(&window, &device, surface_format, show_overlay);

        tracing::info!(
            "GPU initialized with {} backend ({})",
            adapter.get_info().backend.to_str(),
            adapter.get_info().name
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            overlay,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    fn configure_surface(&mut self) {
        let size = self.window.inner_size();
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }
}

impl Compositor for Gpu {
    type Error = RenderError;

    fn resize(&mut self, viewport: &Viewport) {
        self.configure_surface();
        let (bw, bh) = viewport.drawing_buffer_size();
        self.renderer.resize(&self.device, bw, bh);
    }

    fn composite(&mut self, frame: &Frame) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.configure_surface();
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(&self.device, &self.queue, &view, frame);
        self.overlay.paint(
            &self.window,
            &self.device,
            &self.queue,
            &view,
            [self.config.width, self.config.height],
            frame,
        );

        self.window.pre_present_notify();
        output.present();
        Ok(())
    }
}
