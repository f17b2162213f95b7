/// Property attachment workflow
///
/// # Upload
///
/// 1. Verify the property exists
/// 2. Reduce the filename to its last path component
/// 3. Write the bytes to a scratch file
/// 4. Upload it to `property/<id>/attachments/<filename>`
/// 5. Persist the attachment record with the returned ETag
///
/// Re-uploading a filename to the same property replaces the stored object,
/// so earlier live records under that key are soft-deleted first. At most one
/// live record points at a key.
///
/// The scratch file is removed whether or not the upload succeeds. A failed
/// insert after a successful upload leaves the object in the bucket.
///
/// # Download
///
/// The object is fetched into a temporary file whose path is returned; the
/// caller removes it once served.

use crate::error::{ServiceError, ServiceResult};
use crate::models::property::Property;
use crate::models::property_attachment::{NewPropertyAttachment, PropertyAttachment};
use crate::repository::{PropertyAttachmentRepository, Repository};
use crate::storage::{attachment_key, sanitize_filename, scratch_path, ObjectStorage, UploadedObject};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A file extracted from an inbound upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied name; only the final path component is kept
    pub filename: String,

    /// Guessed from the extension when absent
    pub content_type: Option<String>,

    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

pub struct PropertyAttachmentService<P, A, S> {
    properties: P,
    attachments: A,
    storage: S,
    scratch_dir: PathBuf,
}

impl<P, A, S> PropertyAttachmentService<P, A, S>
where
    P: Repository<Entity = Property>,
    A: PropertyAttachmentRepository,
    S: ObjectStorage,
{
    pub fn new(properties: P, attachments: A, storage: S, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            properties,
            attachments,
            storage,
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Uploads a file and records it against the property
    pub async fn attach_to_property(&self, property_id: i64, file: UploadedFile) -> ServiceResult<PropertyAttachment> {
        let property = self.properties.find_by_id(property_id).await?;

        let filename = sanitize_filename(&file.filename)
            .ok_or_else(|| ServiceError::InvalidInput(format!("Invalid filename '{}'", file.filename)))?;

        let content_type = file
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| {
                mime_guess::from_path(&filename)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });

        let key = attachment_key(property.id, &filename);
        let scratch = scratch_path(&self.scratch_dir, &filename);

        let uploaded = self.upload_from_scratch(&scratch, &key, &file.data).await;
        remove_scratch_file(&scratch).await;
        let uploaded = uploaded?;

        self.retire_records_for_key(property.id, &key).await?;

        let attachment = self
            .attachments
            .create(NewPropertyAttachment {
                property_id: property.id,
                filename,
                size: uploaded.size,
                content_type,
                storage_key: key,
                etag: uploaded.etag,
            })
            .await?;

        info!(
            attachment_id = attachment.id,
            property_id,
            key = %attachment.storage_key,
            size = attachment.size,
            "Attached file to property"
        );

        Ok(attachment)
    }

    /// Fetches an attachment into a temporary file and returns its path
    pub async fn download_property_attachment(&self, attachment_id: i64) -> ServiceResult<PathBuf> {
        let attachment = self.attachments.find_by_id(attachment_id).await?;

        let path = self
            .storage
            .download_temp_file(&attachment.storage_key, &attachment.filename)
            .await?;

        Ok(path)
    }

    /// Removes the stored object, then soft-deletes the record
    pub async fn delete_property_attachment(&self, attachment_id: i64) -> ServiceResult<()> {
        let attachment = self.attachments.find_by_id(attachment_id).await?;

        self.storage.delete_object(&attachment.storage_key).await?;
        self.attachments.delete(attachment_id).await?;

        info!(
            attachment_id,
            key = %attachment.storage_key,
            "Deleted property attachment"
        );

        Ok(())
    }

    /// Live attachments of a property, newest first
    pub async fn list_property_attachments(&self, property_id: i64) -> ServiceResult<Vec<PropertyAttachment>> {
        self.properties.find_by_id(property_id).await?;
        Ok(self.attachments.find_by_property(property_id).await?)
    }

    async fn retire_records_for_key(&self, property_id: i64, key: &str) -> ServiceResult<()> {
        let existing = self.attachments.find_by_property(property_id).await?;

        for previous in existing.iter().filter(|a| a.storage_key == key) {
            self.attachments.delete(previous.id).await?;
            info!(
                attachment_id = previous.id,
                property_id,
                key,
                "Replaced attachment with a new upload"
            );
        }

        Ok(())
    }

    async fn upload_from_scratch(&self, scratch: &Path, key: &str, data: &[u8]) -> ServiceResult<UploadedObject> {
        tokio::fs::create_dir_all(&self.scratch_dir).await?;
        tokio::fs::write(scratch, data).await?;
        Ok(self.storage.upload_file(scratch, key, false).await?)
    }
}

async fn remove_scratch_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove scratch file"),
    }
}
