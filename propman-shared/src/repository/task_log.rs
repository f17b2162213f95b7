/// Task log repository

use super::query::{self, ListParams, TableSpec};
use super::{Repository, TaskLogRepository};
use crate::error::{RepoResult, RepositoryError};
use crate::models::task_log::{NewTaskLog, TaskLog, TaskLogPatch};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

pub(crate) const TASK_LOGS: TableSpec = TableSpec {
    entity: "task_log",
    table: "task_logs",
    columns: &[
        "id",
        "task_id",
        "user_id",
        "message",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &["id", "task_id", "user_id", "created_at", "updated_at"],
};

#[derive(Debug, Clone)]
pub struct PgTaskLogRepository {
    pool: PgPool,
}

impl PgTaskLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgTaskLogRepository {
    type Entity = TaskLog;
    type Create = NewTaskLog;
    type Patch = TaskLogPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<TaskLog>> {
        query::fetch_page(&self.pool, &TASK_LOGS, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<TaskLog> {
        query::fetch_by_id(&self.pool, &TASK_LOGS, id).await
    }

    async fn create(&self, data: NewTaskLog) -> RepoResult<TaskLog> {
        let sql = format!(
            "INSERT INTO task_logs (task_id, user_id, message) VALUES ($1, $2, $3){}",
            TASK_LOGS.returning()
        );

        let log = sqlx::query_as::<_, TaskLog>(&sql)
            .bind(data.task_id)
            .bind(data.user_id)
            .bind(data.message)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::wrap(TASK_LOGS.entity, "insert"))?;

        debug!(log_id = log.id, task_id = log.task_id, "Created task log");
        Ok(log)
    }

    async fn update(&self, id: i64, patch: TaskLogPatch) -> RepoResult<TaskLog> {
        let mut log = self.find_by_id(id).await?;
        patch.apply(&mut log);

        let sql = format!(
            "UPDATE task_logs SET user_id = $2, message = $3, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL{}",
            TASK_LOGS.returning()
        );

        sqlx::query_as::<_, TaskLog>(&sql)
            .bind(id)
            .bind(log.user_id)
            .bind(log.message)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::wrap(TASK_LOGS.entity, "update"))?
            .ok_or_else(|| TASK_LOGS.not_found(id))
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &TASK_LOGS, id).await
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &TASK_LOGS).await
    }
}

#[async_trait]
impl TaskLogRepository for PgTaskLogRepository {
    async fn find_by_task(&self, task_id: i64, params: &ListParams) -> RepoResult<Vec<TaskLog>> {
        query::fetch_page(&self.pool, &TASK_LOGS, params, Some(("task_id", task_id))).await
    }
}
