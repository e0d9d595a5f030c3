use crate::{LocalStorage, Storage, StorageError, StorageResult};
use assetkey_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
///
/// Files are served under the configured address prefix.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    config.validate()?;

    let base_path = config
        .local_storage_path()
        .map(String::from)
        .ok_or_else(|| StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string()))?;

    let storage = LocalStorage::new(base_path, config.url_prefix().to_string()).await?;
    Ok(Arc::new(storage))
}
