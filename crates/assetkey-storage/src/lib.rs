//! Asset Key Storage Library
//!
//! This crate provides the storage-client seam used by the upload and edit flows. It
//! includes the Storage trait, a local filesystem implementation, and [`AssetStore`],
//! which names every object with the path-key codec from `assetkey-core`.
//!
//! Storage keys are the encoded asset paths (`folder/name(id){size}.ext`). Keys must not
//! contain `..` or a leading `/`.

pub mod assets;
pub mod factory;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use assets::{AssetStore, PendingUpload};
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
