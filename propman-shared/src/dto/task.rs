/// Task requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::task::{NewTask, TaskPatch, DEFAULT_TASK_STATUS};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    pub description: Option<String>,

    /// Defaults to `open`
    #[validate(length(max = 50))]
    pub status: Option<String>,

    #[validate(length(max = 50))]
    pub priority: Option<String>,

    pub due_date: Option<DateTime<Utc>>,
    pub property_id: Option<i64>,

    #[serde(default)]
    pub assignee_ids: Vec<i64>,
}

impl IntoRecord<NewTask> for CreateTaskRequest {
    fn into_record(self) -> ServiceResult<NewTask> {
        Ok(NewTask {
            title: self.title.trim().to_string(),
            description: non_empty(self.description),
            status: non_empty(self.status).unwrap_or_else(|| DEFAULT_TASK_STATUS.to_string()),
            priority: non_empty(self.priority),
            due_date: self.due_date,
            property_id: self.property_id,
            assignee_ids: self.assignee_ids,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(max = 255))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub status: Option<String>,

    #[validate(length(max = 50))]
    pub priority: Option<String>,

    pub due_date: Option<DateTime<Utc>>,
    pub property_id: Option<i64>,
    pub assignee_ids: Option<Vec<i64>>,
}

impl IntoRecord<TaskPatch> for UpdateTaskRequest {
    fn into_record(self) -> ServiceResult<TaskPatch> {
        Ok(TaskPatch {
            title: non_empty(self.title).map(|t| t.trim().to_string()),
            description: non_empty(self.description),
            status: non_empty(self.status),
            priority: non_empty(self.priority),
            due_date: self.due_date,
            property_id: self.property_id,
            assignee_ids: self.assignee_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_status() {
        let record = CreateTaskRequest {
            title: "Replace filters".to_string(),
            ..Default::default()
        }
        .into_record()
        .unwrap();

        assert_eq!(record.status, "open");
        assert!(record.assignee_ids.is_empty());
    }

    #[test]
    fn test_create_keeps_given_status() {
        let record = CreateTaskRequest {
            title: "Paint hallway".to_string(),
            status: Some("in_progress".to_string()),
            assignee_ids: vec![3],
            ..Default::default()
        }
        .into_record()
        .unwrap();

        assert_eq!(record.status, "in_progress");
        assert_eq!(record.assignee_ids, vec![3]);
    }
}
