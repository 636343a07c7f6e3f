//! Filesystem-based asset provider.
//!
//! Every reference is resolved relative to a base directory and must stay
//! inside it; `../` escapes and absolute paths are reported as not found.

use folio_traits::{AssetError, AssetProvider, SharedAssetData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemAssetProvider {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemAssetProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns `None` if the reference would escape the base directory.
    fn resolve_path_safe(&self, reference: &str) -> Option<PathBuf> {
        let relative = Path::new(reference);
        if relative.is_absolute() {
            return None;
        }
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let full_path = self.base_path.join(relative);
        match (full_path.canonicalize(), &self.canonical_base) {
            // Symlinks may still point outside the base.
            (Ok(canonical), Some(base)) => canonical.starts_with(base).then_some(canonical),
            _ => Some(full_path),
        }
    }
}

impl AssetProvider for FilesystemAssetProvider {
    fn fetch(&self, reference: &str) -> Result<SharedAssetData, AssetError> {
        let full_path = self
            .resolve_path_safe(reference)
            .ok_or_else(|| AssetError::NotFound(format!("{} (outside asset root)", reference)))?;

        log::trace!("Loading asset '{}' from {}", reference, full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(reference.to_string())
            } else {
                AssetError::LoadFailed {
                    path: reference.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, reference: &str) -> bool {
        self.resolve_path_safe(reference)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemAssetProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_filesystem_provider_load_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"not really a png").unwrap();

        let provider = FilesystemAssetProvider::new(dir.path());
        let data = provider.fetch("logo.png").unwrap();
        assert_eq!(&*data, b"not really a png");
    }

    #[test]
    fn test_filesystem_provider_not_found() {
        let dir = tempdir().unwrap();
        let provider = FilesystemAssetProvider::new(dir.path());

        let result = provider.fetch("nonexistent.png");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
        assert!(!provider.exists("nonexistent.png"));
    }

    #[test]
    fn test_filesystem_provider_blocks_path_traversal() {
        let dir = tempdir().unwrap();
        let provider = FilesystemAssetProvider::new(dir.path());

        assert!(provider.fetch("../../../etc/passwd").is_err());
        assert!(!provider.exists("foo/../../bar"));
        assert!(!provider.exists(".."));
    }

    #[test]
    fn test_filesystem_provider_blocks_absolute_paths() {
        let dir = tempdir().unwrap();
        let provider = FilesystemAssetProvider::new(dir.path());

        assert!(matches!(
            provider.fetch("/etc/passwd"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_filesystem_provider_allows_nested_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("logos")).unwrap();
        fs::write(dir.path().join("logos/acme.jpg"), b"jpeg").unwrap();

        let provider = FilesystemAssetProvider::new(dir.path());
        assert!(provider.exists("logos/acme.jpg"));
        assert_eq!(&*provider.fetch("logos/acme.jpg").unwrap(), b"jpeg");
    }

    #[test]
    fn test_directories_are_not_assets() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("logos")).unwrap();

        let provider = FilesystemAssetProvider::new(dir.path());
        assert!(!provider.exists("logos"));
    }
}
