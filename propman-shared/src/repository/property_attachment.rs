/// Property attachment repository
///
/// Stores metadata only; the bytes live in object storage under
/// `storage_key`.

use super::query::{self, ListParams, TableSpec};
use super::{PropertyAttachmentRepository, Repository};
use crate::error::{RepoResult, RepositoryError};
use crate::models::property_attachment::{
    NewPropertyAttachment, PropertyAttachment, PropertyAttachmentPatch,
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

pub(crate) const PROPERTY_ATTACHMENTS: TableSpec = TableSpec {
    entity: "property_attachment",
    table: "property_attachments",
    columns: &[
        "id",
        "property_id",
        "filename",
        "size",
        "content_type",
        "storage_key",
        "etag",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &["id", "property_id", "filename", "size", "created_at", "updated_at"],
};

#[derive(Debug, Clone)]
pub struct PgPropertyAttachmentRepository {
    pool: PgPool,
}

impl PgPropertyAttachmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgPropertyAttachmentRepository {
    type Entity = PropertyAttachment;
    type Create = NewPropertyAttachment;
    type Patch = PropertyAttachmentPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<PropertyAttachment>> {
        query::fetch_page(&self.pool, &PROPERTY_ATTACHMENTS, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<PropertyAttachment> {
        query::fetch_by_id(&self.pool, &PROPERTY_ATTACHMENTS, id).await
    }

    async fn create(&self, data: NewPropertyAttachment) -> RepoResult<PropertyAttachment> {
        let sql = format!(
            "INSERT INTO property_attachments \
             (property_id, filename, size, content_type, storage_key, etag) \
             VALUES ($1, $2, $3, $4, $5, $6){}",
            PROPERTY_ATTACHMENTS.returning()
        );

        let attachment = sqlx::query_as::<_, PropertyAttachment>(&sql)
            .bind(data.property_id)
            .bind(data.filename)
            .bind(data.size)
            .bind(data.content_type)
            .bind(data.storage_key)
            .bind(data.etag)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::wrap(PROPERTY_ATTACHMENTS.entity, "insert"))?;

        info!(
            attachment_id = attachment.id,
            property_id = attachment.property_id,
            key = %attachment.storage_key,
            "Created property attachment"
        );

        Ok(attachment)
    }

    async fn update(&self, id: i64, patch: PropertyAttachmentPatch) -> RepoResult<PropertyAttachment> {
        let mut attachment = self.find_by_id(id).await?;
        patch.apply(&mut attachment);

        let sql = format!(
            "UPDATE property_attachments SET content_type = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL{}",
            PROPERTY_ATTACHMENTS.returning()
        );

        sqlx::query_as::<_, PropertyAttachment>(&sql)
            .bind(id)
            .bind(attachment.content_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::wrap(PROPERTY_ATTACHMENTS.entity, "update"))?
            .ok_or_else(|| PROPERTY_ATTACHMENTS.not_found(id))
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &PROPERTY_ATTACHMENTS, id).await
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &PROPERTY_ATTACHMENTS).await
    }
}

#[async_trait]
impl PropertyAttachmentRepository for PgPropertyAttachmentRepository {
    async fn find_by_property(&self, property_id: i64) -> RepoResult<Vec<PropertyAttachment>> {
        query::fetch_page(
            &self.pool,
            &PROPERTY_ATTACHMENTS,
            &ListParams::default(),
            Some(("property_id", property_id)),
        )
        .await
    }
}
