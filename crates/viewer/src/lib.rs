//! Viewer bootstrap: load the shader pair, build the render context, drive frames.
//!
//! The lifecycle is `load -> initialize -> (render_frame | on_resize)* -> stop`.
//! All mutable loop state lives in one [`Viewer`] value that the host passes
//! through each phase.
//!
//! # Invariants
//! - A viewer only exists once both shader sources loaded.
//! - `elapsed_frames` grows by exactly one per composited frame.
//! - Uniforms reflect the camera as it was when the frame was composited.

pub mod config;
pub mod viewer;

pub use config::{CameraConfig, ConfigError, PixelRatio, ViewerConfig};
pub use viewer::{FrameOutcome, Viewer};

use shaderview_assets::{AssetLoadError, AssetSource, ShaderCache, load_shader_sources};
use shaderview_render::Viewport;

/// Load both shader sources in order, then initialize the viewer.
///
/// A load failure short-circuits: the viewer is never created.
pub async fn bootstrap<S: AssetSource>(
    source: &S,
    cache: &mut ShaderCache,
    viewport: Viewport,
    config: ViewerConfig,
) -> Result<Viewer, AssetLoadError> {
    let sources = load_shader_sources(source, cache, &config.shaders).await?;
    Ok(Viewer::initialize(sources, viewport, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shaderview_assets::FsAssetSource;
    use shaderview_render::DebugTextCompositor;

    fn write_shaders(dir: &std::path::Path) {
        std::fs::create_dir(dir.join("shaders")).unwrap();
        std::fs::write(dir.join("shaders/VS.wgsl"), "@vertex fn vs_main() {}").unwrap();
        std::fs::write(dir.join("shaders/FS.wgsl"), "@fragment fn fs_main() {}").unwrap();
    }

    #[test]
    fn bootstrap_then_render() {
        let dir = tempfile::tempdir().unwrap();
        write_shaders(dir.path());
        let source = FsAssetSource::new(dir.path());
        let mut cache = ShaderCache::new();

        let mut viewer = pollster::block_on(bootstrap(
            &source,
            &mut cache,
            Viewport::new(800, 600, 1.0),
            ViewerConfig::default(),
        ))
        .unwrap();

        let mut compositor = DebugTextCompositor::new();
        let outcome = viewer.render_frame(&mut compositor).unwrap();
        assert_eq!(outcome, FrameOutcome::Continue);
        assert_eq!(compositor.frames_submitted(), 1);
        assert_eq!(&*viewer.sources().vertex, "@vertex fn vs_main() {}");
    }

    #[test]
    fn missing_vertex_shader_never_initializes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("shaders")).unwrap();
        std::fs::write(dir.path().join("shaders/FS.wgsl"), "@fragment fn fs_main() {}").unwrap();
        let source = FsAssetSource::new(dir.path());
        let mut cache = ShaderCache::new();

        let result = pollster::block_on(bootstrap(
            &source,
            &mut cache,
            Viewport::new(800, 600, 1.0),
            ViewerConfig::default(),
        ));
        assert!(matches!(result, Err(AssetLoadError::Io { .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn bootstrap_uses_configured_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.wgsl"), "vertex").unwrap();
        std::fs::write(dir.path().join("b.wgsl"), "fragment").unwrap();
        let config: ViewerConfig =
            ViewerConfig::from_json_str(r#"{"shaders":{"vertex":"a.wgsl","fragment":"b.wgsl"}}"#)
                .unwrap();

        let viewer = pollster::block_on(bootstrap(
            &FsAssetSource::new(dir.path()),
            &mut ShaderCache::new(),
            Viewport::new(320, 240, 1.0),
            config,
        ))
        .unwrap();
        assert_eq!(&*viewer.sources().fragment, "fragment");
    }
}
