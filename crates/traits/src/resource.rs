//! AssetProvider trait for abstracting asset loading.
//!
//! The renderer never touches the filesystem or the network itself; image
//! bytes are handed to it by an implementation of this trait.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for asset loading operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid asset format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::Io(err.to_string())
    }
}

/// Shared asset data type (reference-counted bytes).
pub type SharedAssetData = Arc<Vec<u8>>;

/// Synchronous source of asset bytes.
///
/// Implementations must be safe to share between concurrent renders.
///
/// # Example
///
/// ```ignore
/// let provider = InMemoryAssetProvider::new();
/// provider.add("logo.png", logo_bytes)?;
/// let data = provider.fetch("logo.png")?;
/// ```
pub trait AssetProvider: Send + Sync + Debug {
    /// Fetch an asset by its reference (path, key or URI).
    fn fetch(&self, reference: &str) -> Result<SharedAssetData, AssetError>;

    /// Check if an asset exists without loading it.
    fn exists(&self, reference: &str) -> bool;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<P: AssetProvider + ?Sized> AssetProvider for Arc<P> {
    fn fetch(&self, reference: &str) -> Result<SharedAssetData, AssetError> {
        (**self).fetch(reference)
    }

    fn exists(&self, reference: &str) -> bool {
        (**self).exists(reference)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// An in-memory asset provider.
///
/// Assets must be added before rendering. Useful for tests and for callers
/// that already hold logo bytes (e.g. loaded from a database row).
#[derive(Debug, Default)]
pub struct InMemoryAssetProvider {
    assets: RwLock<HashMap<String, SharedAssetData>>,
}

impl InMemoryAssetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset under `reference`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, reference: impl Into<String>, data: Vec<u8>) -> Result<(), AssetError> {
        let reference = reference.into();
        let mut assets = self.assets.write().map_err(|_| AssetError::LoadFailed {
            path: reference.clone(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets.insert(reference, Arc::new(data));
        Ok(())
    }

    /// Builder-style variant of [`add`](Self::add) for test setup.
    pub fn with_asset(self, reference: impl Into<String>, data: Vec<u8>) -> Self {
        if let Ok(mut assets) = self.assets.write() {
            assets.insert(reference.into(), Arc::new(data));
        }
        self
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetProvider for InMemoryAssetProvider {
    fn fetch(&self, reference: &str) -> Result<SharedAssetData, AssetError> {
        let assets = self.assets.read().map_err(|_| AssetError::LoadFailed {
            path: reference.to_string(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets
            .get(reference)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(reference.to_string()))
    }

    fn exists(&self, reference: &str) -> bool {
        self.assets
            .read()
            .map(|a| a.contains_key(reference))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryAssetProvider"
    }
}
