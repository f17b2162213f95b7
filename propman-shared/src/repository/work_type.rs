/// Work type repository

use super::query::{self, ListParams, TableSpec};
use super::Repository;
use crate::error::{RepoResult, RepositoryError};
use crate::models::work_type::{NewWorkType, WorkType, WorkTypePatch};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

pub(crate) const WORK_TYPES: TableSpec = TableSpec {
    entity: "work_type",
    table: "work_types",
    columns: &["id", "name", "description", "created_at", "updated_at", "deleted_at"],
    sortable: &["id", "name", "created_at", "updated_at"],
};

#[derive(Debug, Clone)]
pub struct PgWorkTypeRepository {
    pool: PgPool,
}

impl PgWorkTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgWorkTypeRepository {
    type Entity = WorkType;
    type Create = NewWorkType;
    type Patch = WorkTypePatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<WorkType>> {
        query::fetch_page(&self.pool, &WORK_TYPES, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<WorkType> {
        query::fetch_by_id(&self.pool, &WORK_TYPES, id).await
    }

    async fn create(&self, data: NewWorkType) -> RepoResult<WorkType> {
        let sql = format!(
            "INSERT INTO work_types (name, description) VALUES ($1, $2){}",
            WORK_TYPES.returning()
        );

        let work_type = sqlx::query_as::<_, WorkType>(&sql)
            .bind(data.name)
            .bind(data.description)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::wrap(WORK_TYPES.entity, "insert"))?;

        info!(work_type_id = work_type.id, name = %work_type.name, "Created work type");
        Ok(work_type)
    }

    async fn update(&self, id: i64, patch: WorkTypePatch) -> RepoResult<WorkType> {
        let mut work_type = self.find_by_id(id).await?;
        patch.apply(&mut work_type);

        let sql = format!(
            "UPDATE work_types SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL{}",
            WORK_TYPES.returning()
        );

        sqlx::query_as::<_, WorkType>(&sql)
            .bind(id)
            .bind(work_type.name)
            .bind(work_type.description)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::wrap(WORK_TYPES.entity, "update"))?
            .ok_or_else(|| WORK_TYPES.not_found(id))
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &WORK_TYPES, id).await?;
        info!(work_type_id = id, "Deleted work type");
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &WORK_TYPES).await
    }
}
