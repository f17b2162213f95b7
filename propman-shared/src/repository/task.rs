/// Task repository
///
/// `find_by_id` eager-loads assignees (through `assignments`) and the
/// task's log entries.

use super::associations::ASSIGNMENTS;
use super::query::{self, ListParams, TableSpec};
use super::task_log::TASK_LOGS;
use super::user::USERS;
use super::Repository;
use crate::error::{RepoResult, RepositoryError};
use crate::models::task::{NewTask, Task, TaskPatch};
use crate::models::task_log::TaskLog;
use crate::models::user::User;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

pub(crate) const TASKS: TableSpec = TableSpec {
    entity: "task",
    table: "tasks",
    columns: &[
        "id",
        "title",
        "description",
        "status",
        "priority",
        "due_date",
        "property_id",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &[
        "id",
        "title",
        "status",
        "priority",
        "due_date",
        "property_id",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgTaskRepository {
    type Entity = Task;
    type Create = NewTask;
    type Patch = TaskPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<Task>> {
        query::fetch_page(&self.pool, &TASKS, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Task> {
        let mut task: Task = query::fetch_by_id(&self.pool, &TASKS, id).await?;

        let unbounded = ListParams::default();
        let (assignees, logs) = futures::try_join!(
            ASSIGNMENTS.load_linked::<User>(&self.pool, &USERS, id),
            query::fetch_page::<TaskLog>(
                &self.pool,
                &TASK_LOGS,
                &unbounded,
                Some(("task_id", id)),
            ),
        )?;

        debug!(task_id = id, assignees = assignees.len(), logs = logs.len(), "Loaded task relations");

        task.assignees = assignees;
        task.logs = logs;
        Ok(task)
    }

    async fn create(&self, data: NewTask) -> RepoResult<Task> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO tasks (title, description, status, priority, due_date, property_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.status)
        .bind(&data.priority)
        .bind(data.due_date)
        .bind(data.property_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::wrap(TASKS.entity, "insert"))?;

        ASSIGNMENTS.append(&self.pool, id, &data.assignee_ids).await?;

        info!(task_id = id, status = %data.status, "Created task");

        self.find_by_id(id).await
    }

    async fn update(&self, id: i64, patch: TaskPatch) -> RepoResult<Task> {
        let mut task = self.find_by_id(id).await?;
        patch.apply(&mut task);

        let result = sqlx::query(
            "UPDATE tasks SET title = $2, description = $3, status = $4, priority = $5, \
             due_date = $6, property_id = $7, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(&task.priority)
        .bind(task.due_date)
        .bind(task.property_id)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::wrap(TASKS.entity, "update"))?;

        if result.rows_affected() == 0 {
            return Err(TASKS.not_found(id));
        }

        if let Some(assignee_ids) = &patch.assignee_ids {
            let mode = ASSIGNMENTS.sync(&self.pool, id, assignee_ids).await?;
            debug!(task_id = id, ?mode, "Synced task assignees");
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &TASKS, id).await?;
        info!(task_id = id, "Deleted task");
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &TASKS).await
    }
}
