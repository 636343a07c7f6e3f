pub mod executor;
pub mod resource;

pub use executor::{Executor, SyncExecutor};
pub use resource::{AssetError, AssetProvider, InMemoryAssetProvider, SharedAssetData};
