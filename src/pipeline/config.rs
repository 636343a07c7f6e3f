use crate::error::PipelineError;
use folio_layout::LayoutConfig;
use folio_template::FieldResolver;
use folio_template::resolver::DEFAULT_CURRENCY_FIELDS;
use folio_types::FontFamily;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Renderer configuration, usually loaded from a JSON file.
///
/// Every key is optional:
///
/// ```json
/// {
///   "currency_fields": ["unit_price", "total", "amount", "subtotal"],
///   "currency_decimals": 2,
///   "asset_root": "./assets",
///   "default_font_family": "Helvetica",
///   "default_font_size": 12
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Keys whose numbers render as money. Matched against the last dotted
    /// segment, so `total` also covers `line_items.3.total`.
    pub currency_fields: Vec<String>,
    pub currency_decimals: usize,
    /// Base directory for image references. Without it, images can only come
    /// from an explicitly supplied asset provider.
    pub asset_root: Option<PathBuf>,
    pub default_font_family: String,
    pub default_font_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self {
            currency_fields: DEFAULT_CURRENCY_FIELDS.iter().map(|s| s.to_string()).collect(),
            currency_decimals: 2,
            asset_root: None,
            default_font_family: layout.default_font_family.to_string(),
            default_font_size: layout.default_font_size,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let config: RenderConfig = serde_json::from_str(json)
            .map_err(|e| PipelineError::Config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&source)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if !(self.default_font_size.is_finite() && self.default_font_size > 0.0) {
            return Err(PipelineError::Config(format!(
                "default_font_size must be positive, got {}",
                self.default_font_size
            )));
        }
        if self.default_font_family.trim().is_empty() {
            return Err(PipelineError::Config("default_font_family is empty".to_string()));
        }
        Ok(())
    }

    pub fn field_resolver(&self) -> FieldResolver {
        FieldResolver::new(self.currency_fields.iter().cloned(), self.currency_decimals)
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            default_font_family: FontFamily::new(self.default_font_family.as_str()),
            default_font_size: self.default_font_size,
        }
    }
}
