/// Size of the render target in logical pixels plus the pixel ratio used to
/// derive the drawing-buffer size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    aspect_ratio: f32,
    pixel_ratio: f32,
}

impl Viewport {
    /// Zero extents are raised to one pixel; a non-positive ratio becomes 1.
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            aspect_ratio: width as f32 / height as f32,
            pixel_ratio: sanitize_ratio(pixel_ratio).unwrap_or(1.0),
        }
    }

    /// Apply a new extent. Zero-sized extents (a minimised window) are
    /// rejected and leave the viewport unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            tracing::debug!("ignoring zero-sized viewport {width}x{height}");
            return false;
        }
        self.width = width;
        self.height = height;
        self.aspect_ratio = width as f32 / height as f32;
        true
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) -> bool {
        match sanitize_ratio(pixel_ratio) {
            Some(r) => {
                self.pixel_ratio = r;
                true
            }
            None => false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Render-target size in physical pixels, never below 1x1.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

fn sanitize_ratio(r: f32) -> Option<f32> {
    (r.is_finite() && r > 0.0).then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_follows_extent() {
        let mut vp = Viewport::new(800, 600, 1.0);
        assert!((vp.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(vp.drawing_buffer_size(), (800, 600));

        assert!(vp.resize(1024, 768));
        assert!((vp.aspect_ratio() - 1024.0 / 768.0).abs() < 1e-6);
        assert_eq!(vp.drawing_buffer_size(), (1024, 768));

        assert!(vp.resize(1920, 600));
        assert!((vp.aspect_ratio() - 3.2).abs() < 1e-6);
    }

    #[test]
    fn zero_extent_is_rejected() {
        let mut vp = Viewport::new(800, 600, 1.0);
        assert!(!vp.resize(0, 600));
        assert!(!vp.resize(800, 0));
        assert_eq!((vp.width(), vp.height()), (800, 600));
        assert!((vp.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn new_clamps_degenerate_input() {
        let vp = Viewport::new(0, 0, f32::NAN);
        assert_eq!((vp.width(), vp.height()), (1, 1));
        assert_eq!(vp.pixel_ratio(), 1.0);
        assert_eq!(vp.aspect_ratio(), 1.0);
    }

    #[test]
    fn pixel_ratio_scales_drawing_buffer() {
        let mut vp = Viewport::new(640, 480, 2.0);
        assert_eq!(vp.drawing_buffer_size(), (1280, 960));
        assert!(vp.set_pixel_ratio(1.5));
        assert_eq!(vp.drawing_buffer_size(), (960, 720));
        assert!(!vp.set_pixel_ratio(0.0));
        assert!(!vp.set_pixel_ratio(-2.0));
        assert_eq!(vp.pixel_ratio(), 1.5);
        // Aspect ratio is independent of the pixel ratio.
        assert!((vp.aspect_ratio() - 640.0 / 480.0).abs() < 1e-6);
    }
}
