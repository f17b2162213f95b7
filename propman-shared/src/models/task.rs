/// Task model
///
/// Tasks are assigned to users through the `assignments` join table and
/// carry a history of `TaskLog` entries. `find_by_id` fills `assignees`
/// and `logs`.

use super::task_log::TaskLog;
use super::user::User;
use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status given to tasks created without one
pub const DEFAULT_TASK_STATUS: &str = "open";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,

    /// Property the task concerns, if any
    pub property_id: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,

    #[sqlx(skip)]
    #[serde(default)]
    pub assignees: Vec<User>,

    #[sqlx(skip)]
    #[serde(default)]
    pub logs: Vec<TaskLog>,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub property_id: Option<i64>,

    /// Users to assign on insert
    pub assignee_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub property_id: Option<i64>,
    pub assignee_ids: Option<Vec<i64>>,
}

impl TaskPatch {
    pub fn apply(&self, task: &mut Task) {
        patch_field(&mut task.title, &self.title);
        patch_nullable(&mut task.description, &self.description);
        patch_field(&mut task.status, &self.status);
        patch_nullable(&mut task.priority, &self.priority);
        patch_nullable(&mut task.due_date, &self.due_date);
        patch_nullable(&mut task.property_id, &self.property_id);
    }
}
