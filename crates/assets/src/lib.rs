//! Shader asset loading: text sources, a process-lifetime cache, ordered loading.
//!
//! The viewer needs exactly two text assets, a vertex shader and a fragment
//! shader. They are fetched through an [`AssetSource`], stored in a
//! [`ShaderCache`] under fixed names and handed out as [`ShaderSources`].
//!
//! # Invariants
//! - The vertex source is fetched before the fragment source. A failed vertex
//!   fetch means the fragment fetch is never attempted.
//! - Cached entries are never invalidated or re-fetched.

mod cache;
mod source;

pub use cache::ShaderCache;
pub use source::{AssetSource, FsAssetSource};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Cache name of the vertex shader source.
pub const VERTEX_KEY: &str = "VS";
/// Cache name of the fragment shader source.
pub const FRAGMENT_KEY: &str = "FS";

/// Errors from loading shader sources.
#[derive(Debug, thiserror::Error)]
pub enum AssetLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader source {} is empty", .path.display())]
    Empty { path: PathBuf },
}

/// Relative locations of the two shader assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/VS.wgsl"),
            fragment: PathBuf::from("shaders/FS.wgsl"),
        }
    }
}

/// Immutable vertex/fragment source pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: Arc<str>,
    pub fragment: Arc<str>,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<Arc<str>>, fragment: impl Into<Arc<str>>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Load the vertex source, then the fragment source.
///
/// Names already present in `cache` are served from it without touching
/// `source`. The first failure is logged and returned; nothing after it runs.
pub async fn load_shader_sources<S: AssetSource>(
    source: &S,
    cache: &mut ShaderCache,
    paths: &ShaderPaths,
) -> Result<ShaderSources, AssetLoadError> {
    let vertex = load_cached(source, cache, VERTEX_KEY, &paths.vertex).await?;
    let fragment = load_cached(source, cache, FRAGMENT_KEY, &paths.fragment).await?;
    Ok(ShaderSources { vertex, fragment })
}

async fn load_cached<S: AssetSource>(
    source: &S,
    cache: &mut ShaderCache,
    key: &str,
    path: &Path,
) -> Result<Arc<str>, AssetLoadError> {
    if let Some(text) = cache.get(key) {
        tracing::debug!("{key} served from cache");
        return Ok(text);
    }

    let fetched = source.fetch_text(path).await.and_then(|text| {
        if text.trim().is_empty() {
            Err(AssetLoadError::Empty {
                path: path.to_path_buf(),
            })
        } else {
            Ok(text)
        }
    });

    match fetched {
        Ok(text) => {
            tracing::info!("loaded {key} from {} ({} bytes)", path.display(), text.len());
            Ok(cache.insert(key, text))
        }
        Err(e) => {
            tracing::error!("failed to load {key}: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    /// In-memory source that records every path it is asked for.
    #[derive(Default)]
    struct RecordingSource {
        files: BTreeMap<PathBuf, String>,
        requests: RefCell<Vec<PathBuf>>,
    }

    impl RecordingSource {
        fn with(mut self, path: &str, text: &str) -> Self {
            self.files.insert(PathBuf::from(path), text.to_string());
            self
        }
    }

    impl AssetSource for RecordingSource {
        async fn fetch_text(&self, path: &Path) -> Result<String, AssetLoadError> {
            self.requests.borrow_mut().push(path.to_path_buf());
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| AssetLoadError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
        }
    }

    fn both() -> RecordingSource {
        RecordingSource::default()
            .with("shaders/VS.wgsl", "@vertex fn vs() {}")
            .with("shaders/FS.wgsl", "@fragment fn fs() {}")
    }

    #[test]
    fn loads_vertex_then_fragment() {
        let source = both();
        let mut cache = ShaderCache::new();
        let sources =
            pollster::block_on(load_shader_sources(&source, &mut cache, &ShaderPaths::default()))
                .unwrap();

        assert_eq!(&*sources.vertex, "@vertex fn vs() {}");
        assert_eq!(&*sources.fragment, "@fragment fn fs() {}");
        assert_eq!(
            *source.requests.borrow(),
            vec![
                PathBuf::from("shaders/VS.wgsl"),
                PathBuf::from("shaders/FS.wgsl")
            ]
        );
        assert!(cache.contains(VERTEX_KEY));
        assert!(cache.contains(FRAGMENT_KEY));
    }

    #[test]
    fn vertex_failure_skips_fragment_fetch() {
        let source = RecordingSource::default().with("shaders/FS.wgsl", "@fragment fn fs() {}");
        let mut cache = ShaderCache::new();
        let err =
            pollster::block_on(load_shader_sources(&source, &mut cache, &ShaderPaths::default()))
                .unwrap_err();

        assert!(matches!(err, AssetLoadError::Io { .. }));
        assert_eq!(source.requests.borrow().len(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn fragment_failure_is_reported() {
        let source = RecordingSource::default().with("shaders/VS.wgsl", "@vertex fn vs() {}");
        let mut cache = ShaderCache::new();
        let err =
            pollster::block_on(load_shader_sources(&source, &mut cache, &ShaderPaths::default()))
                .unwrap_err();

        match err {
            AssetLoadError::Io { path, .. } => assert_eq!(path, PathBuf::from("shaders/FS.wgsl")),
            other => panic!("unexpected error: {other}"),
        }
        // The vertex source stays cached.
        assert!(cache.contains(VERTEX_KEY));
        assert!(!cache.contains(FRAGMENT_KEY));
    }

    #[test]
    fn blank_source_is_rejected() {
        let source = RecordingSource::default()
            .with("shaders/VS.wgsl", "  \n\t")
            .with("shaders/FS.wgsl", "@fragment fn fs() {}");
        let mut cache = ShaderCache::new();
        let err =
            pollster::block_on(load_shader_sources(&source, &mut cache, &ShaderPaths::default()))
                .unwrap_err();

        assert!(matches!(err, AssetLoadError::Empty { .. }));
        assert_eq!(source.requests.borrow().len(), 1);
    }

    #[test]
    fn cached_names_are_not_refetched() {
        let source = both();
        let mut cache = ShaderCache::new();
        let paths = ShaderPaths::default();
        let first = pollster::block_on(load_shader_sources(&source, &mut cache, &paths)).unwrap();
        let second = pollster::block_on(load_shader_sources(&source, &mut cache, &paths)).unwrap();

        assert_eq!(first, second);
        assert_eq!(source.requests.borrow().len(), 2);
    }

    #[test]
    fn shader_paths_deserialize_with_defaults() {
        let paths: ShaderPaths = serde_json::from_str(r#"{"fragment":"fx/raymarch.wgsl"}"#)
            .unwrap();
        assert_eq!(paths.vertex, PathBuf::from("shaders/VS.wgsl"));
        assert_eq!(paths.fragment, PathBuf::from("fx/raymarch.wgsl"));
    }
}
