// src/pipeline/builder.rs
use super::config::RenderConfig;
use super::renderer::DocumentRenderer;
use crate::error::PipelineError;
use folio_executor::ExecutorImpl;
use folio_layout::LayoutEngine;
use folio_resource::FilesystemAssetProvider;
use folio_traits::{AssetProvider, InMemoryAssetProvider};
use std::path::Path;
use std::sync::Arc;

/// A builder for creating a [`DocumentRenderer`].
#[derive(Default)]
pub struct RendererBuilder {
    config: RenderConfig,
    assets: Option<Arc<dyn AssetProvider>>,
    executor: ExecutorImpl,
}

impl RendererBuilder {
    /// Creates a builder with default configuration and the default executor.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads configuration from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = RenderConfig::from_file(path)?;
        Ok(self)
    }

    /// Supplies image assets. Takes precedence over `asset_root` in the configuration.
    pub fn with_asset_provider<P: AssetProvider + 'static>(mut self, provider: P) -> Self {
        self.assets = Some(Arc::new(provider));
        self
    }

    /// Selects the executor used by [`DocumentRenderer::render_batch`].
    pub fn with_executor(mut self, executor: ExecutorImpl) -> Self {
        self.executor = executor;
        self
    }

    pub fn build(self) -> Result<DocumentRenderer, PipelineError> {
        let assets: Arc<dyn AssetProvider> = match (self.assets, &self.config.asset_root) {
            (Some(provider), _) => provider,
            (None, Some(root)) => {
                if !root.is_dir() {
                    return Err(PipelineError::Config(format!(
                        "asset_root '{}' is not a directory",
                        root.display()
                    )));
                }
                log::debug!("Serving assets from {}", root.display());
                Arc::new(FilesystemAssetProvider::new(root))
            }
            (None, None) => Arc::new(InMemoryAssetProvider::new()),
        };
        log::debug!("Using asset provider '{}'", assets.name());

        let engine = LayoutEngine::new(assets)
            .with_resolver(self.config.field_resolver())
            .with_config(self.config.layout_config());

        Ok(DocumentRenderer::new(engine, self.executor))
    }
}
