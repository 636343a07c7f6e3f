//! Asset providers and image preparation for the folio renderer.
//!
//! - [`FilesystemAssetProvider`]: Loads assets from the local filesystem
//! - [`InMemoryAssetProvider`]: Pre-populated in-memory storage (re-exported)
//! - [`decode_image`]: Turns fetched bytes into an [`ImageAsset`](folio_types::ImageAsset)

mod filesystem;
mod image_decode;

pub use filesystem::FilesystemAssetProvider;
pub use image_decode::decode_image;

pub use folio_traits::InMemoryAssetProvider;
