//! Layout: template + data record → ordered drawing commands.
//!
//! The layout engine knows nothing about the output format. It produces
//! [`DrawCommand`]s in template page coordinates together with the fonts and
//! images they reference.

pub mod command;
pub mod config;
mod engine;
pub mod fonts;
pub mod output;
pub mod resources;

pub use self::command::DrawCommand;
pub use self::config::LayoutConfig;
pub use self::engine::LayoutEngine;
pub use self::fonts::{FontTable, STANDARD_FONTS, is_standard_font};
pub use self::output::{PageLayout, SkipReason, SkippedElement};
pub use self::resources::ImageTable;
