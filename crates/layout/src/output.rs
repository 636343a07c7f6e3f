//! Output types from the layout engine.

use crate::command::DrawCommand;
use crate::fonts::FontTable;
use crate::resources::ImageTable;
use folio_traits::AssetError;
use folio_types::Size;
use std::fmt;

/// Why an element produced no drawing commands.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// An image element without a `src`.
    EmptySource,
    /// An image or rectangle whose width or height is not positive.
    NonPositiveSize { width: f32, height: f32 },
    /// The asset provider could not deliver a usable image.
    AssetUnavailable(AssetError),
    /// A rectangle without fill or stroke, or a line without stroke.
    NoPaint,
}

impl SkipReason {
    /// `NoPaint` is a legitimate no-op; everything else points at bad template data.
    pub fn is_anomaly(&self) -> bool {
        !matches!(self, SkipReason::NoPaint)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptySource => f.write_str("image has no source"),
            SkipReason::NonPositiveSize { width, height } => {
                write!(f, "non-positive size {}x{}", width, height)
            }
            SkipReason::AssetUnavailable(err) => write!(f, "asset unavailable: {}", err),
            SkipReason::NoPaint => f.write_str("nothing to paint"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedElement {
    /// Position of the element in the template's element list.
    pub index: usize,
    pub id: Option<String>,
    pub kind: &'static str,
    pub reason: SkipReason,
}

/// A laid-out page: commands in paint order plus the resources they reference.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub page_size: Size,
    pub commands: Vec<DrawCommand>,
    pub fonts: FontTable,
    pub images: ImageTable,
    pub skipped: Vec<SkippedElement>,
}
