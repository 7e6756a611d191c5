mod gpu;
mod overlay;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use gpu::Gpu;
use shaderview_assets::{FsAssetSource, ShaderCache, ShaderSources, load_shader_sources};
use shaderview_input::{PointerButton, PointerTracker, WheelDelta};
use shaderview_render_wgpu::{RenderError, RendererOptions};
use shaderview_viewer::{FrameOutcome, PixelRatio, Viewer, ViewerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "shaderview-desktop", about = "Real-time shader viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory shader paths are resolved against
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vertex shader path, relative to the asset directory
    #[arg(long)]
    vertex: Option<PathBuf>,

    /// Fragment shader path, relative to the asset directory
    #[arg(long)]
    fragment: Option<PathBuf>,

    /// Fixed drawing-buffer pixel ratio
    #[arg(long, conflicts_with = "device_pixel_ratio")]
    pixel_ratio: Option<f32>,

    /// Follow the display's scale factor instead of a fixed pixel ratio
    #[arg(long)]
    device_pixel_ratio: bool,

    /// Draw a reference grid in the scene pass
    #[arg(long)]
    grid: bool,

    /// Show the stats overlay at start-up
    #[arg(long)]
    stats: bool,

    /// Initial window width in physical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in physical pixels
    #[arg(long, default_value = "720")]
    height: u32,
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied.
    fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::from_file(path)?,
            None => ViewerConfig::default(),
        };
        if let Some(vertex) = &self.vertex {
            config.shaders.vertex = vertex.clone();
        }
        if let Some(fragment) = &self.fragment {
            config.shaders.fragment = fragment.clone();
        }
        if let Some(ratio) = self.pixel_ratio {
            config.pixel_ratio = PixelRatio::Fixed(ratio);
        }
        if self.device_pixel_ratio {
            config.pixel_ratio = PixelRatio::Device;
        }
        config.show_grid |= self.grid;
        Ok(config)
    }
}

/// Window, GPU and viewer, created once in `resumed`.
struct Running {
    gpu: Gpu,
    viewer: Viewer,
}

struct ViewerApp {
    config: ViewerConfig,
    sources: ShaderSources,
    initial_size: PhysicalSize<u32>,
    show_stats: bool,
    pointer: PointerTracker,
    running: Option<Running>,
    error: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(config: ViewerConfig, sources: ShaderSources, cli: &Cli) -> Self {
        Self {
            config,
            sources,
            initial_size: PhysicalSize::new(cli.width, cli.height),
            show_stats: cli.stats,
            pointer: PointerTracker::new(),
            running: None,
            error: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("shaderview")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let scale = window.scale_factor();
        let logical: LogicalSize<u32> = window.inner_size().to_logical(scale);
        let viewport = self
            .config
            .viewport(logical.width, logical.height, scale as f32);

        let options = RendererOptions {
            clear_color: self.config.clear_color,
            show_grid: self.config.show_grid,
        };
        let gpu = Gpu::new(window.clone(), &viewport, &self.sources, options, self.show_stats)?;
        let viewer = Viewer::initialize(self.sources.clone(), viewport, self.config.clone());

        self.running = Some(Running { gpu, viewer });
        window.request_redraw();
        Ok(())
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let Some(Running { gpu, viewer }) = &mut self.running else {
            return;
        };
        match viewer.render_frame(gpu) {
            Ok(FrameOutcome::Continue) => gpu.window().request_redraw(),
            Ok(FrameOutcome::Stopped) => {}
            Err(RenderError::Surface(
                e @ (wgpu::SurfaceError::Lost
                | wgpu::SurfaceError::Outdated
                | wgpu::SurfaceError::Timeout),
            )) => {
                tracing::debug!("frame skipped: {e}");
                gpu.window().request_redraw();
            }
            Err(e) => {
                tracing::error!("render failed: {e}");
                viewer.stop();
                self.error = Some(e.into());
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            tracing::error!("viewer not started: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(Running { gpu, viewer }) = &mut self.running else {
            return;
        };

        let window = gpu.window().clone();
        if gpu.overlay.on_window_event(&window, &event) {
            return;
        }
        let scale = window.scale_factor();

        match event {
            WindowEvent::CloseRequested => {
                viewer.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let logical: LogicalSize<u32> = new_size.to_logical(scale);
                viewer.on_resize(logical.width, logical.height, gpu);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if viewer.config().pixel_ratio == PixelRatio::Device {
                    viewer.set_pixel_ratio(scale_factor as f32, gpu);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key {
                KeyCode::F1 => gpu.overlay.toggle(),
                KeyCode::Escape => {
                    viewer.stop();
                    event_loop.exit();
                }
                _ => {}
            },
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.pointer
                    .set_pan_modifier(state.shift_key() || state.control_key() || state.super_key());
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Middle,
                    _ => return,
                };
                self.pointer
                    .on_button(button, state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let p = position.to_logical::<f32>(scale);
                if let Some(action) = self.pointer.on_cursor_moved(Vec2::new(p.x, p.y)) {
                    viewer.apply(action);
                }
            }
            WindowEvent::CursorLeft { .. } => self.pointer.on_cursor_left(),
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => WheelDelta::Lines(y),
                    MouseScrollDelta::PixelDelta(p) => {
                        WheelDelta::Pixels(p.to_logical::<f32>(scale).y)
                    }
                };
                if let Some(action) = self.pointer.on_wheel(delta) {
                    viewer.apply(action);
                }
            }
            WindowEvent::RedrawRequested => self.render(event_loop),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("shaderview-desktop starting");

    let config = cli.viewer_config()?;
    let source = FsAssetSource::new(&cli.assets);
    let mut cache = ShaderCache::new();
    let sources = pollster::block_on(load_shader_sources(&source, &mut cache, &config.shaders))
        .context("shader sources unavailable, viewer not started")?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ViewerApp::new(config, sources, &cli);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from([
            "shaderview-desktop",
            "--fragment",
            "fx/tunnel.wgsl",
            "--pixel-ratio",
            "2",
            "--grid",
        ]);
        let config = cli.viewer_config().unwrap();
        assert_eq!(config.shaders.fragment, PathBuf::from("fx/tunnel.wgsl"));
        assert_eq!(config.shaders.vertex, PathBuf::from("shaders/VS.wgsl"));
        assert_eq!(config.pixel_ratio, PixelRatio::Fixed(2.0));
        assert!(config.show_grid);
    }

    #[test]
    fn device_pixel_ratio_flag() {
        let cli = Cli::parse_from(["shaderview-desktop", "--device-pixel-ratio"]);
        assert_eq!(cli.viewer_config().unwrap().pixel_ratio, PixelRatio::Device);
    }

    #[test]
    fn pixel_ratio_flags_conflict() {
        let result = Cli::try_parse_from([
            "shaderview-desktop",
            "--pixel-ratio",
            "2",
            "--device-pixel-ratio",
        ]);
        assert!(result.is_err());
    }
}
