/// Property attachment model
///
/// The file itself lives in object storage under
/// `property/<property_id>/attachments/<filename>`; this row records where,
/// how large, and the ETag the store returned.

use super::patch_field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyAttachment {
    pub id: i64,
    pub property_id: i64,
    pub filename: String,

    /// Size in bytes as reported by the upload
    pub size: i64,

    pub content_type: String,
    pub storage_key: String,
    pub etag: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewPropertyAttachment {
    pub property_id: i64,
    pub filename: String,
    pub size: i64,
    pub content_type: String,
    pub storage_key: String,
    pub etag: String,
}

/// Metadata corrections; the stored object is not touched
#[derive(Debug, Clone, Default)]
pub struct PropertyAttachmentPatch {
    pub content_type: Option<String>,
}

impl PropertyAttachmentPatch {
    pub fn apply(&self, attachment: &mut PropertyAttachment) {
        patch_field(&mut attachment.content_type, &self.content_type);
    }
}
