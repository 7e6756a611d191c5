use crate::ViewerConfig;
use shaderview_assets::ShaderSources;
use shaderview_camera::{OrbitController, PerspectiveCamera};
use shaderview_input::Action;
use shaderview_render::{Compositor, Frame, FrameUniforms, Viewport};

/// What the host should do after [`Viewer::render_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule the next frame.
    Continue,
    /// The viewer was stopped; do not schedule again.
    Stopped,
}

/// Render context: one camera, one controller, one viewport, one uniform set.
///
/// Created once both shader sources are available and then threaded through
/// every frame and resize by the host. Nothing else owns this state.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    sources: ShaderSources,
    camera: PerspectiveCamera,
    controller: OrbitController,
    viewport: Viewport,
    uniforms: FrameUniforms,
    running: bool,
}

impl Viewer {
    pub fn initialize(sources: ShaderSources, viewport: Viewport, config: ViewerConfig) -> Self {
        let cam = &config.camera;
        let mut camera = PerspectiveCamera::new(
            cam.fov_degrees,
            viewport.aspect_ratio(),
            cam.near,
            cam.far,
        )
        .with_position(cam.position);
        let controller = OrbitController::bind(&mut camera, cam.target, config.controls);

        let uniforms = FrameUniforms {
            camera_position: camera.position,
            camera_direction: camera.direction(),
            elapsed_frames: 0,
            aspect_ratio: viewport.aspect_ratio(),
        };

        tracing::info!(
            "viewer initialized: {}x{} (pixel ratio {}), camera at {:?}",
            viewport.width(),
            viewport.height(),
            viewport.pixel_ratio(),
            camera.position
        );

        Self {
            config,
            sources,
            camera,
            controller,
            viewport,
            uniforms,
            running: true,
        }
    }

    /// Advance the controller, refresh the uniforms and composite one frame.
    ///
    /// The frame counter only advances when the compositor accepts the frame.
    pub fn render_frame<C: Compositor>(
        &mut self,
        compositor: &mut C,
    ) -> Result<FrameOutcome, C::Error> {
        if !self.running {
            return Ok(FrameOutcome::Stopped);
        }

        self.controller.update(&mut self.camera);

        let uniforms = FrameUniforms {
            camera_position: self.camera.position,
            camera_direction: self.camera.direction(),
            elapsed_frames: self.uniforms.elapsed_frames + 1,
            aspect_ratio: self.viewport.aspect_ratio(),
        };
        let frame = Frame {
            uniforms,
            view_projection: self.camera.view_projection(),
            viewport: self.viewport,
        };
        compositor.composite(&frame)?;
        self.uniforms = uniforms;

        Ok(FrameOutcome::Continue)
    }

    /// Apply a new viewport extent in logical pixels.
    ///
    /// Returns `false` (and changes nothing) for zero-sized extents.
    pub fn on_resize<C: Compositor>(&mut self, width: u32, height: u32, compositor: &mut C) -> bool {
        if !self.viewport.resize(width, height) {
            return false;
        }
        self.sync_viewport(compositor);
        true
    }

    /// Change the pixel ratio, e.g. after the window moved to another display.
    pub fn set_pixel_ratio<C: Compositor>(&mut self, pixel_ratio: f32, compositor: &mut C) -> bool {
        if !self.viewport.set_pixel_ratio(pixel_ratio) {
            return false;
        }
        self.sync_viewport(compositor);
        true
    }

    fn sync_viewport<C: Compositor>(&mut self, compositor: &mut C) {
        let aspect = self.viewport.aspect_ratio();
        self.uniforms.aspect_ratio = aspect;
        self.camera.aspect = aspect;
        compositor.resize(&self.viewport);
        let (bw, bh) = self.viewport.drawing_buffer_size();
        tracing::debug!(
            "viewport {}x{} aspect {aspect:.4} buffer {bw}x{bh}",
            self.viewport.width(),
            self.viewport.height()
        );
    }

    /// Feed a pointer action to the orbit controller.
    pub fn apply(&mut self, action: Action) {
        let height = self.viewport.height() as f32;
        match action {
            Action::Rotate(d) => self.controller.rotate(d.x, d.y, height),
            Action::Pan(d) => self.controller.pan(&self.camera, d.x, d.y, height),
            Action::Zoom(steps) => self.controller.zoom(steps),
        }
    }

    /// Stop the loop; later [`render_frame`](Self::render_frame) calls do nothing.
    pub fn stop(&mut self) {
        if self.running {
            tracing::info!("viewer stopped after {} frames", self.uniforms.elapsed_frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn uniforms(&self) -> &FrameUniforms {
        &self.uniforms
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn sources(&self) -> &ShaderSources {
        &self.sources
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use shaderview_render::DebugTextCompositor;

    fn viewer(width: u32, height: u32) -> Viewer {
        Viewer::initialize(
            ShaderSources::new("vertex", "fragment"),
            Viewport::new(width, height, 1.0),
            ViewerConfig::default(),
        )
    }

    /// Compositor that fails every frame.
    struct FailingCompositor;

    impl Compositor for FailingCompositor {
        type Error = &'static str;

        fn resize(&mut self, _viewport: &Viewport) {}

        fn composite(&mut self, _frame: &Frame) -> Result<(), &'static str> {
            Err("device lost")
        }
    }

    #[test]
    fn initial_state() {
        let v = viewer(800, 600);
        let u = v.uniforms();
        assert_eq!(u.elapsed_frames, 0);
        assert!((u.aspect_ratio - 800.0 / 600.0).abs() < 1e-6);
        assert!(u.camera_position.abs_diff_eq(Vec3::new(2.0, 2.0, 2.0), 1e-5));
        assert!(u.camera_direction.abs_diff_eq(Vec3::splat(-1.0).normalize(), 1e-5));
        assert_eq!(v.camera().fov_degrees, 75.0);
        assert!(v.is_running());
    }

    #[test]
    fn frame_counter_increments_by_one() {
        let mut v = viewer(800, 600);
        let mut c = DebugTextCompositor::new();
        for expected in 1..=5 {
            assert_eq!(v.render_frame(&mut c).unwrap(), FrameOutcome::Continue);
            assert_eq!(v.uniforms().elapsed_frames, expected);
        }
        let counts: Vec<u64> = c.frames().iter().map(|f| f.uniforms.elapsed_frames).collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn uniforms_track_camera_each_frame() {
        let mut v = viewer(800, 600);
        let mut c = DebugTextCompositor::new();
        v.apply(Action::Rotate(Vec2::new(200.0, 50.0)));

        for _ in 0..10 {
            v.render_frame(&mut c).unwrap();
            let sent = c.last_frame().unwrap().uniforms;
            assert_eq!(sent.camera_position, v.camera().position);
            assert_eq!(sent.camera_direction, v.camera().direction());
        }

        // Damped rotation keeps moving the camera between frames.
        let frames = c.frames();
        assert_ne!(
            frames[0].uniforms.camera_position,
            frames[9].uniforms.camera_position
        );
    }

    #[test]
    fn resize_updates_aspect_and_compositor() {
        let mut v = viewer(800, 600);
        let mut c = DebugTextCompositor::new();
        assert!((v.uniforms().aspect_ratio - 4.0 / 3.0).abs() < 1e-6);

        assert!(v.on_resize(1024, 768, &mut c));
        assert!((v.uniforms().aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
        let seen = c.viewport().unwrap();
        assert_eq!(seen.drawing_buffer_size(), (1024, 768));

        assert!(v.on_resize(1000, 500, &mut c));
        assert!((v.uniforms().aspect_ratio - 2.0).abs() < 1e-6);
        assert!((v.camera().aspect - 2.0).abs() < 1e-6);

        v.render_frame(&mut c).unwrap();
        assert!((c.last_frame().unwrap().uniforms.aspect_ratio - 2.0).abs() < 1e-6);
    }

    #[test]
    fn latest_resize_wins() {
        let mut v = viewer(800, 600);
        let mut c = DebugTextCompositor::new();
        v.on_resize(640, 480, &mut c);
        v.on_resize(1600, 400, &mut c);
        assert_eq!(c.resize_count(), 2);
        assert!((v.uniforms().aspect_ratio - 4.0).abs() < 1e-6);
        assert_eq!(v.viewport().width(), 1600);
    }

    #[test]
    fn zero_resize_keeps_previous_state() {
        let mut v = viewer(800, 600);
        let mut c = DebugTextCompositor::new();
        assert!(!v.on_resize(0, 0, &mut c));
        assert_eq!(c.resize_count(), 0);
        assert!((v.uniforms().aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn pixel_ratio_change_resizes_buffer() {
        let mut v = viewer(800, 600);
        let mut c = DebugTextCompositor::new();
        assert!(v.set_pixel_ratio(2.0, &mut c));
        assert_eq!(c.viewport().unwrap().drawing_buffer_size(), (1600, 1200));
        assert!(!v.set_pixel_ratio(0.0, &mut c));
        assert_eq!(c.resize_count(), 1);
    }

    #[test]
    fn stopped_viewer_renders_nothing() {
        let mut v = viewer(800, 600);
        let mut c = DebugTextCompositor::new();
        v.render_frame(&mut c).unwrap();
        v.stop();
        assert!(!v.is_running());
        assert_eq!(v.render_frame(&mut c).unwrap(), FrameOutcome::Stopped);
        assert_eq!(c.frames_submitted(), 1);
        assert_eq!(v.uniforms().elapsed_frames, 1);
    }

    #[test]
    fn failed_frame_does_not_advance_counter() {
        let mut v = viewer(800, 600);
        assert_eq!(v.render_frame(&mut FailingCompositor), Err("device lost"));
        assert_eq!(v.uniforms().elapsed_frames, 0);

        let mut c = DebugTextCompositor::new();
        v.render_frame(&mut c).unwrap();
        assert_eq!(v.uniforms().elapsed_frames, 1);
    }

    #[test]
    fn zoom_and_pan_actions_move_camera() {
        let mut v = viewer(800, 600);
        let mut c = DebugTextCompositor::new();
        let start_distance = v.camera().position.length();

        v.apply(Action::Zoom(5.0));
        for _ in 0..200 {
            v.render_frame(&mut c).unwrap();
        }
        assert!(v.camera().position.length() < start_distance);

        v.apply(Action::Pan(Vec2::new(300.0, 0.0)));
        for _ in 0..200 {
            v.render_frame(&mut c).unwrap();
        }
        assert_ne!(v.controller().target(), Vec3::ZERO);
    }

    #[test]
    fn end_to_end_resize_scenario() {
        let mut v = viewer(800, 600);
        let mut c = DebugTextCompositor::new();
        v.render_frame(&mut c).unwrap();
        assert!((c.last_frame().unwrap().uniforms.aspect_ratio - 1.3333334).abs() < 1e-6);

        v.on_resize(1024, 768, &mut c);
        v.render_frame(&mut c).unwrap();
        let last = c.last_frame().unwrap();
        assert!((last.uniforms.aspect_ratio - 1.3333334).abs() < 1e-6);
        assert_eq!(last.viewport.drawing_buffer_size(), (1024, 768));
        assert_eq!(last.uniforms.elapsed_frames, 2);
    }
}
