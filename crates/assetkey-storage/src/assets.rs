//! Asset upload and cleanup flows
//!
//! [`AssetStore`] ties the path-key codec to a [`Storage`] backend. Every object is
//! written and deleted under its encoded asset path, so the URL handed back to callers
//! can later be decoded into the same key during an edit.

use std::collections::HashMap;
use std::sync::Arc;

use assetkey_core::{sanitize_base_name, AssetKey, AssetSource, PathKeyCodec, SizeTag};

use crate::traits::{Storage, StorageError, StorageResult};

/// A freshly uploaded file waiting for its key.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Clone)]
pub struct AssetStore {
    storage: Arc<dyn Storage>,
    codec: PathKeyCodec,
}

impl AssetStore {
    pub fn new(storage: Arc<dyn Storage>, codec: PathKeyCodec) -> Self {
        AssetStore { storage, codec }
    }

    pub fn codec(&self) -> &PathKeyCodec {
        &self.codec
    }

    /// Upload `data` under the encoded path of `key` and return its public URL.
    pub async fn upload(
        &self,
        key: &AssetKey,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        if key.base_name().is_empty() {
            return Err(StorageError::InvalidKey(
                "Asset key has an empty base name".to_string(),
            ));
        }
        let storage_key = self.codec.encode(key);
        self.storage
            .upload_with_key(&storage_key, data, content_type)
            .await
    }

    /// Key every image of an edit and upload the new ones.
    ///
    /// Stored URLs are decoded as they are; each upload gets a fresh key in `folder`.
    /// Uploads come after stored references, so a new file replaces a stored one with
    /// the same base name in the returned map.
    pub async fn upload_batch(
        &self,
        uploads: Vec<PendingUpload>,
        stored_urls: &[String],
        folder: &str,
        id_prefix: Option<&str>,
        size: Option<SizeTag>,
    ) -> StorageResult<HashMap<String, AssetKey>> {
        let sources = stored_urls
            .iter()
            .map(|url| AssetSource::Stored { url: url.clone() })
            .chain(uploads.iter().map(|upload| AssetSource::Upload {
                file_name: upload.file_name.clone(),
            }));
        let mapping = self.codec.map_keys(sources, folder, id_prefix, size);

        for upload in uploads {
            let Some(key) = mapping.get(&sanitize_base_name(&upload.file_name)) else {
                tracing::warn!(file_name = %upload.file_name, "No asset key for upload, skipping");
                continue;
            };
            let url = self.upload(key, upload.data, &upload.content_type).await?;
            tracing::debug!(file_name = %upload.file_name, url = %url, "Uploaded asset");
        }

        Ok(mapping)
    }

    /// Delete every key. All deletions are attempted; the first failure is returned.
    pub async fn remove<'a, I>(&self, keys: I) -> StorageResult<()>
    where
        I: IntoIterator<Item = &'a AssetKey>,
    {
        let mut first_error = None;
        for key in keys {
            let storage_key = self.codec.encode(key);
            if let Err(e) = self.storage.delete(&storage_key).await {
                tracing::error!(error = %e, key = %storage_key, "Asset delete failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Delete stored assets that are no longer referenced by `current`.
    ///
    /// Returns the keys that were removed.
    pub async fn remove_orphans(
        &self,
        current: &HashMap<String, AssetKey>,
        previous_urls: &[String],
    ) -> StorageResult<Vec<AssetKey>> {
        let orphans = self.codec.diff_and_prune(current, previous_urls);
        tracing::info!(count = orphans.len(), "Removing orphaned assets");
        self.remove(&orphans).await?;
        Ok(orphans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalStorage;
    use assetkey_core::{Config, DraftKey};
    use tempfile::{tempdir, TempDir};

    const PREFIX: &str = "http://localhost:3000/assets";

    async fn store() -> (TempDir, AssetStore) {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), PREFIX.to_string())
            .await
            .unwrap();
        let codec = PathKeyCodec::new(&Config::new(PREFIX).unwrap()).unwrap();
        (dir, AssetStore::new(Arc::new(storage), codec))
    }

    fn pending(file_name: &str) -> PendingUpload {
        PendingUpload {
            file_name: file_name.to_string(),
            content_type: "image/webp".to_string(),
            data: file_name.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_upload_returns_decodable_url() {
        let (dir, store) = store().await;
        let key = DraftKey::new("gallery", "sunset.webp")
            .require_id()
            .with_size(SizeTag::Lg)
            .seal();

        let url = store.upload(&key, b"pixels".to_vec(), "image/webp").await.unwrap();

        assert_eq!(url, store.codec().url_for(&key));
        assert!(store.codec().decode(&url).is_same(&key));
        assert!(dir.path().join(key.to_path()).exists());
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_key() {
        let (_dir, store) = store().await;
        let result = store.upload(&AssetKey::default(), vec![1], "image/png").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_upload_batch_keys_new_and_stored() {
        let (dir, store) = store().await;
        let stored = vec![format!("{}/shop/old(5).webp", PREFIX)];

        let mapping = store
            .upload_batch(vec![pending("new pic.webp")], &stored, "shop", Some("P"), None)
            .await
            .unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["old.webp"].id(), Some("5"));

        let fresh = &mapping["new-pic.webp"];
        assert!(fresh.id().unwrap().starts_with('P'));
        let written = std::fs::read(dir.path().join(fresh.to_path())).unwrap();
        assert_eq!(written, b"new pic.webp");
    }

    #[tokio::test]
    async fn test_remove_orphans_deletes_unreferenced() {
        let (dir, store) = store().await;
        let keep = DraftKey::new("d", "a.jpg").with_id("1").seal();
        let stale = DraftKey::new("d", "b.jpg").with_id("2").seal();
        let keep_url = store.upload(&keep, b"a".to_vec(), "image/jpeg").await.unwrap();
        let stale_url = store.upload(&stale, b"b".to_vec(), "image/jpeg").await.unwrap();

        let current = HashMap::from([(keep.base_name().to_string(), keep.clone())]);
        let removed = store
            .remove_orphans(&current, &[keep_url, stale_url])
            .await
            .unwrap();

        assert_eq!(removed, vec![stale.clone()]);
        assert!(dir.path().join(keep.to_path()).exists());
        assert!(!dir.path().join(stale.to_path()).exists());
    }

    #[tokio::test]
    async fn test_remove_missing_keys_is_ok() {
        let (_dir, store) = store().await;
        let key = DraftKey::new("d", "ghost.png").with_id("9").seal();
        assert!(store.remove([&key]).await.is_ok());
    }
}
