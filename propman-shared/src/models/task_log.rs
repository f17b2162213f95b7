/// Task log model: a history entry on a task (many per task)

use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskLog {
    pub id: i64,
    pub task_id: i64,
    pub user_id: Option<i64>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewTaskLog {
    pub task_id: i64,
    pub user_id: Option<i64>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct TaskLogPatch {
    pub user_id: Option<i64>,
    pub message: Option<String>,
}

impl TaskLogPatch {
    pub fn apply(&self, log: &mut TaskLog) {
        patch_nullable(&mut log.user_id, &self.user_id);
        patch_field(&mut log.message, &self.message);
    }
}
