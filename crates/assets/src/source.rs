use crate::AssetLoadError;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Something that can fetch a text asset by relative path.
pub trait AssetSource {
    fn fetch_text(&self, path: &Path) -> impl Future<Output = Result<String, AssetLoadError>>;
}

/// Reads assets from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for FsAssetSource {
    /// Reads synchronously; the returned future is ready on its first poll.
    async fn fetch_text(&self, path: &Path) -> Result<String, AssetLoadError> {
        let full = self.root.join(path);
        tracing::debug!("reading {}", full.display());
        std::fs::read_to_string(&full).map_err(|source| AssetLoadError::Io { path: full, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ShaderCache, ShaderPaths, load_shader_sources};

    #[test]
    fn reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("shaders")).unwrap();
        std::fs::write(dir.path().join("shaders/VS.wgsl"), "@vertex fn vs() {}").unwrap();

        let source = FsAssetSource::new(dir.path());
        let text = pollster::block_on(source.fetch_text(Path::new("shaders/VS.wgsl"))).unwrap();
        assert_eq!(text, "@vertex fn vs() {}");
    }

    #[test]
    fn missing_file_reports_full_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsAssetSource::new(dir.path());
        let err = pollster::block_on(source.fetch_text(Path::new("nope.wgsl"))).unwrap_err();
        match err {
            AssetLoadError::Io { path, source } => {
                assert_eq!(path, dir.path().join("nope.wgsl"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_pair_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("shaders")).unwrap();
        std::fs::write(dir.path().join("shaders/VS.wgsl"), "vertex").unwrap();
        std::fs::write(dir.path().join("shaders/FS.wgsl"), "fragment").unwrap();

        let source = FsAssetSource::new(dir.path());
        let mut cache = ShaderCache::new();
        let sources =
            pollster::block_on(load_shader_sources(&source, &mut cache, &ShaderPaths::default()))
                .unwrap();
        assert_eq!(&*sources.vertex, "vertex");
        assert_eq!(&*sources.fragment, "fragment");
    }
}
