/// In-process object storage
///
/// Objects are kept in a map behind a `RwLock`. ETags are the hex SHA-256
/// of the content, so identical uploads produce identical tags.

use super::{scratch_path, ObjectStorage, StorageError, StorageResult, UploadedObject};
use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    etag: String,
    is_public: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryStorage {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    scratch_dir: PathBuf,
}

impl MemoryStorage {
    /// Downloads are written to `scratch_dir`
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Content stored under `key`
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.read().await.get(key).map(|o| o.data.clone())
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    /// ETag recorded when `key` was last uploaded
    pub async fn etag(&self, key: &str) -> Option<String> {
        self.objects.read().await.get(key).map(|o| o.etag.clone())
    }

    pub async fn is_public(&self, key: &str) -> Option<bool> {
        self.objects.read().await.get(key).map(|o| o.is_public)
    }

    /// Stored keys, sorted
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload_file(&self, local_path: &Path, key: &str, is_public: bool) -> StorageResult<UploadedObject> {
        let data = Bytes::from(tokio::fs::read(local_path).await?);
        let etag = hex::encode(Sha256::digest(&data));
        let size = data.len() as i64;

        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data,
                etag: etag.clone(),
                is_public,
            },
        );

        Ok(UploadedObject { etag, size })
    }

    async fn download_temp_file(&self, key: &str, filename: &str) -> StorageResult<PathBuf> {
        let data = self
            .get(key)
            .await
            .ok_or_else(|| StorageError::Download {
                key: key.to_string(),
                message: "no such key".to_string(),
            })?;

        tokio::fs::create_dir_all(&self.scratch_dir).await?;
        let path = scratch_path(&self.scratch_dir, filename);
        tokio::fs::write(&path, &data).await?;
        Ok(path)
    }

    /// Deleting a missing key succeeds, as S3 `DeleteObject` does
    async fn delete_object(&self, key: &str) -> StorageResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_download_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MemoryStorage::new(dir.path());

        let source = dir.path().join("source.txt");
        tokio::fs::write(&source, b"lease terms").await.unwrap();

        let uploaded = storage.upload_file(&source, "property/1/attachments/lease.txt", false).await.unwrap();
        assert_eq!(uploaded.size, 11);
        assert_eq!(uploaded.etag.len(), 64);
        assert_eq!(
            storage.etag("property/1/attachments/lease.txt").await,
            Some(uploaded.etag.clone())
        );
        assert_eq!(storage.is_public("property/1/attachments/lease.txt").await, Some(false));

        let path = storage
            .download_temp_file("property/1/attachments/lease.txt", "lease.txt")
            .await
            .unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"lease terms");
    }

    #[tokio::test]
    async fn test_identical_content_has_identical_etag() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MemoryStorage::new(dir.path());

        let source = dir.path().join("a.bin");
        tokio::fs::write(&source, b"same").await.unwrap();

        let first = storage.upload_file(&source, "a", false).await.unwrap();
        let second = storage.upload_file(&source, "b", true).await.unwrap();
        assert_eq!(first.etag, second.etag);
        assert_eq!(storage.keys().await, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_download_of_missing_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MemoryStorage::new(dir.path());

        assert!(matches!(
            storage.download_temp_file("nope", "nope.txt").await,
            Err(StorageError::Download { .. })
        ));
        assert_eq!(storage.etag("nope").await, None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MemoryStorage::new(dir.path());

        let source = dir.path().join("a.bin");
        tokio::fs::write(&source, b"x").await.unwrap();
        storage.upload_file(&source, "a", false).await.unwrap();

        storage.delete_object("a").await.unwrap();
        assert!(!storage.contains("a").await);
        storage.delete_object("a").await.unwrap();
        storage.delete_object("never-uploaded").await.unwrap();
    }
}
