//! Viewer configuration, loadable from JSON with every field defaulted.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shaderview_assets::ShaderPaths;
use shaderview_camera::OrbitSettings;
use shaderview_render::Viewport;
use std::path::{Path, PathBuf};

/// Errors from reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How the drawing-buffer resolution relates to the window's logical size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelRatio {
    /// Fixed ratio regardless of the display.
    Fixed(f32),
    /// Follow the display's scale factor.
    Device,
}

impl Default for PixelRatio {
    fn default() -> Self {
        PixelRatio::Fixed(1.0)
    }
}

impl PixelRatio {
    pub fn resolve(self, device_scale: f32) -> f32 {
        match self {
            PixelRatio::Fixed(r) => r,
            PixelRatio::Device => device_scale,
        }
    }
}

/// Initial camera placement and projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Point the orbit controller circles around.
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.01,
            far: 100.0,
            position: Vec3::new(2.0, 2.0, 2.0),
            target: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub controls: OrbitSettings,
    pub pixel_ratio: PixelRatio,
    /// Scene clear colour as `0xRRGGBB`.
    pub clear_color: u32,
    /// Draw a reference grid in the scene pass.
    pub show_grid: bool,
    pub shaders: ShaderPaths,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            controls: OrbitSettings::default(),
            pixel_ratio: PixelRatio::default(),
            clear_color: 0x203030,
            show_grid: false,
            shaders: ShaderPaths::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the controller cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controls
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("controls: {e}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&data)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Viewport for a window of `width`x`height` logical pixels.
    pub fn viewport(&self, width: u32, height: u32, device_scale: f32) -> Viewport {
        Viewport::new(width, height, self.pixel_ratio.resolve(device_scale))
    }
}
