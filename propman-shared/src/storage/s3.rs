/// S3-compatible object storage
///
/// Works against AWS S3 and against self-hosted endpoints (MinIO, Ceph);
/// requests use path-style addressing so a custom `ENDPOINT` needs no
/// wildcard DNS.

use super::{normalize_etag, scratch_path, ObjectStorage, StorageError, StorageResult, UploadedObject};
use crate::config::StorageConfig;
use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    scratch_dir: PathBuf,
}

impl S3Storage {
    /// Builds a client from storage settings
    pub async fn from_config(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "propman",
        );

        let mut loader = aws_config::from_env()
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = config.endpoint.as_deref().unwrap_or("aws"),
            "Initialized S3 storage"
        );

        Self::with_client(Client::from_conf(s3_config), config.bucket.clone(), config.scratch_dir.clone())
    }

    pub fn with_client(client: Client, bucket: String, scratch_dir: PathBuf) -> Self {
        Self {
            client,
            bucket,
            scratch_dir,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload_file(&self, local_path: &Path, key: &str, is_public: bool) -> StorageResult<UploadedObject> {
        let size = tokio::fs::metadata(local_path).await?.len() as i64;

        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body);

        if is_public {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }

        let output = request.send().await.map_err(|e| StorageError::Upload {
            key: key.to_string(),
            message: DisplayErrorContext(&e).to_string(),
        })?;

        let etag = output
            .e_tag()
            .map(normalize_etag)
            .ok_or_else(|| StorageError::MissingETag(key.to_string()))?;

        info!(bucket = %self.bucket, key, size, "Uploaded object");

        Ok(UploadedObject { etag, size })
    }

    async fn download_temp_file(&self, key: &str, filename: &str) -> StorageResult<PathBuf> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Download {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Download {
                key: key.to_string(),
                message: e.to_string(),
            })?
            .into_bytes();

        tokio::fs::create_dir_all(&self.scratch_dir).await?;
        let path = scratch_path(&self.scratch_dir, filename);
        tokio::fs::write(&path, &data).await?;

        debug!(key, path = %path.display(), bytes = data.len(), "Downloaded object");

        Ok(path)
    }

    async fn delete_object(&self, key: &str) -> StorageResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        info!(bucket = %self.bucket, key, "Deleted object");
        Ok(())
    }
}
