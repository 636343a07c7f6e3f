//! PDF serialization for laid-out pages.
//!
//! The writer emits objects directly into a byte buffer and records each
//! object's offset as it goes. Drawing commands arrive in template
//! coordinates; the y axis is flipped here and nowhere else.

mod content;
mod document;
mod error;
pub mod utils;
mod writer;

pub use document::{RenderedDocument, serialize, serialize_page};
pub use error::RenderError;
pub use utils::flip_y;
