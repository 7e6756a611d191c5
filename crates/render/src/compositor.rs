use crate::{Frame, Viewport};
use std::convert::Infallible;

/// Backend that turns [`Frame`]s into pixels.
///
/// The viewer calls [`resize`](Compositor::resize) whenever the viewport
/// changes and [`composite`](Compositor::composite) once per rendered frame.
pub trait Compositor {
    type Error;

    fn resize(&mut self, viewport: &Viewport);

    /// Run the full pass chain for one frame and submit it.
    fn composite(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// Compositor that records a text line per frame instead of drawing.
///
/// Useful for headless runs, logging, and testing the viewer loop.
#[derive(Debug, Default)]
pub struct DebugTextCompositor {
    lines: Vec<String>,
    frames: Vec<Frame>,
    viewport: Option<Viewport>,
    resizes: usize,
}

impl DebugTextCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_submitted(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Last viewport passed to [`Compositor::resize`].
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn describe(frame: &Frame) -> String {
        let u = &frame.uniforms;
        let (bw, bh) = frame.viewport.drawing_buffer_size();
        format!(
            "frame={} aspect={:.4} cam_pos=({:.3}, {:.3}, {:.3}) cam_dir=({:.3}, {:.3}, {:.3}) buffer={}x{}",
            u.elapsed_frames,
            u.aspect_ratio,
            u.camera_position.x,
            u.camera_position.y,
            u.camera_position.z,
            u.camera_direction.x,
            u.camera_direction.y,
            u.camera_direction.z,
            bw,
            bh
        )
    }
}

impl Compositor for DebugTextCompositor {
    type Error = Infallible;

    fn resize(&mut self, viewport: &Viewport) {
        let (bw, bh) = viewport.drawing_buffer_size();
        self.lines.push(format!(
            "resize {}x{} aspect={:.4} buffer={}x{}",
            viewport.width(),
            viewport.height(),
            viewport.aspect_ratio(),
            bw,
            bh
        ));
        self.viewport = Some(*viewport);
        self.resizes += 1;
    }

    fn composite(&mut self, frame: &Frame) -> Result<(), Infallible> {
        self.lines.push(Self::describe(frame));
        self.frames.push(*frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameUniforms;
    use glam::{Mat4, Vec3};

    fn frame(n: u64) -> Frame {
        Frame {
            uniforms: FrameUniforms {
                camera_position: Vec3::new(2.0, 2.0, 2.0),
                camera_direction: Vec3::splat(-1.0).normalize(),
                elapsed_frames: n,
                aspect_ratio: 800.0 / 600.0,
            },
            view_projection: Mat4::IDENTITY,
            viewport: Viewport::new(800, 600, 1.0),
        }
    }

    #[test]
    fn records_frames_in_order() {
        let mut c = DebugTextCompositor::new();
        c.composite(&frame(1)).unwrap();
        c.composite(&frame(2)).unwrap();
        assert_eq!(c.frames_submitted(), 2);
        assert_eq!(c.last_frame().unwrap().uniforms.elapsed_frames, 2);
        assert!(c.lines()[0].starts_with("frame=1 aspect=1.3333"));
        assert!(c.lines()[1].contains("cam_pos=(2.000, 2.000, 2.000)"));
        assert!(c.lines()[1].contains("buffer=800x600"));
    }

    #[test]
    fn records_resizes() {
        let mut c = DebugTextCompositor::new();
        assert!(c.viewport().is_none());
        c.resize(&Viewport::new(1024, 768, 2.0));
        assert_eq!(c.resize_count(), 1);
        assert_eq!(c.viewport().unwrap().width(), 1024);
        assert_eq!(c.lines()[0], "resize 1024x768 aspect=1.3333 buffer=2048x1536");
    }
}
