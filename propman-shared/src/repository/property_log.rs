/// Property log repository

use super::query::{self, ListParams, TableSpec};
use super::{PropertyLogRepository, Repository};
use crate::error::{RepoResult, RepositoryError};
use crate::models::property_log::{NewPropertyLog, PropertyLog, PropertyLogPatch};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

pub(crate) const PROPERTY_LOGS: TableSpec = TableSpec {
    entity: "property_log",
    table: "property_logs",
    columns: &[
        "id",
        "property_id",
        "user_id",
        "message",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &["id", "property_id", "user_id", "created_at", "updated_at"],
};

#[derive(Debug, Clone)]
pub struct PgPropertyLogRepository {
    pool: PgPool,
}

impl PgPropertyLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgPropertyLogRepository {
    type Entity = PropertyLog;
    type Create = NewPropertyLog;
    type Patch = PropertyLogPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<PropertyLog>> {
        query::fetch_page(&self.pool, &PROPERTY_LOGS, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<PropertyLog> {
        query::fetch_by_id(&self.pool, &PROPERTY_LOGS, id).await
    }

    async fn create(&self, data: NewPropertyLog) -> RepoResult<PropertyLog> {
        let sql = format!(
            "INSERT INTO property_logs (property_id, user_id, message) VALUES ($1, $2, $3){}",
            PROPERTY_LOGS.returning()
        );

        let log = sqlx::query_as::<_, PropertyLog>(&sql)
            .bind(data.property_id)
            .bind(data.user_id)
            .bind(data.message)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::wrap(PROPERTY_LOGS.entity, "insert"))?;

        debug!(log_id = log.id, property_id = log.property_id, "Created property log");
        Ok(log)
    }

    async fn update(&self, id: i64, patch: PropertyLogPatch) -> RepoResult<PropertyLog> {
        let mut log = self.find_by_id(id).await?;
        patch.apply(&mut log);

        let sql = format!(
            "UPDATE property_logs SET user_id = $2, message = $3, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL{}",
            PROPERTY_LOGS.returning()
        );

        sqlx::query_as::<_, PropertyLog>(&sql)
            .bind(id)
            .bind(log.user_id)
            .bind(log.message)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::wrap(PROPERTY_LOGS.entity, "update"))?
            .ok_or_else(|| PROPERTY_LOGS.not_found(id))
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &PROPERTY_LOGS, id).await
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &PROPERTY_LOGS).await
    }
}

#[async_trait]
impl PropertyLogRepository for PgPropertyLogRepository {
    async fn find_by_property(&self, property_id: i64, params: &ListParams) -> RepoResult<Vec<PropertyLog>> {
        query::fetch_page(&self.pool, &PROPERTY_LOGS, params, Some(("property_id", property_id))).await
    }
}
