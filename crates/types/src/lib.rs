pub mod color;
pub mod geometry;
pub mod ids;
pub mod image;

pub use color::Color;
pub use geometry::{Point, Size};
pub use ids::{AssetRef, FontFamily, TemplateId};
pub use image::{ImageAsset, ImageColorSpace, ImageEncoding};
