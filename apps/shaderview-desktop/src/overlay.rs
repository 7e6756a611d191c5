use egui::Context as EguiContext;
use shaderview_render::Frame;
use std::time::Instant;
use winit::event::WindowEvent;
use winit::window::Window;

/// egui stats panel drawn on top of the composited frame.
pub struct Overlay {
    ctx: EguiContext,
    winit: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    pub visible: bool,
    last_frame: Instant,
    fps: f32,
}

impl Overlay {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        visible: bool,
    ) -> Self {
        let ctx = EguiContext::default();
        let winit = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);
        Self {
            ctx,
            winit,
            renderer,
            visible,
            last_frame: Instant::now(),
            fps: 0.0,
        }
    }

    /// Returns `true` if egui consumed the event.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.winit.on_window_event(window, event);
        self.visible && response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        if dt > 0.0 {
            // Exponential moving average.
            self.fps = if self.fps == 0.0 {
                1.0 / dt
            } else {
                self.fps * 0.9 + (1.0 / dt) * 0.1
            };
        }
    }

    /// Draw the panel onto `view`, after the frame's passes were submitted.
    pub fn paint(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        frame: &Frame,
    ) {
        self.tick();

        let raw_input = self.winit.take_egui_input(window);
        let visible = self.visible;
        let fps = self.fps;
        let full_output = self.ctx.run(raw_input, |ctx| {
            if visible {
                draw_stats(ctx, frame, fps);
            }
        });
        self.winit
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("overlay_encoder"),
        });
        self.renderer
            .update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

fn draw_stats(ctx: &EguiContext, frame: &Frame, fps: f32) {
    let u = &frame.uniforms;
    let (bw, bh) = frame.viewport.drawing_buffer_size();
    egui::Window::new("shaderview")
        .resizable(false)
        .default_pos([12.0, 12.0])
        .show(ctx, |ui| {
            ui.label(format!("Frame: {}  ({fps:.0} fps)", u.elapsed_frames));
            ui.label(format!(
                "Camera: ({:.2}, {:.2}, {:.2})",
                u.camera_position.x, u.camera_position.y, u.camera_position.z
            ));
            ui.label(format!(
                "Direction: ({:.2}, {:.2}, {:.2})",
                u.camera_direction.x, u.camera_direction.y, u.camera_direction.z
            ));
            ui.label(format!("Aspect: {:.3}", u.aspect_ratio));
            ui.label(format!(
                "Viewport: {}x{} @ {}x = {bw}x{bh}",
                frame.viewport.width(),
                frame.viewport.height(),
                frame.viewport.pixel_ratio()
            ));
            ui.separator();
            ui.small("F1: Toggle | LMB: Orbit | RMB/Shift+LMB: Pan | Wheel: Zoom");
        });
}
