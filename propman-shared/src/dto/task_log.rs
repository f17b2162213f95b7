/// Task log requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::task_log::{NewTaskLog, TaskLogPatch};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskLogRequest {
    #[validate(range(min = 1))]
    pub task_id: i64,

    pub user_id: Option<i64>,

    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: String,
}

impl IntoRecord<NewTaskLog> for CreateTaskLogRequest {
    fn into_record(self) -> ServiceResult<NewTaskLog> {
        Ok(NewTaskLog {
            task_id: self.task_id,
            user_id: self.user_id,
            message: self.message,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTaskLogRequest {
    pub user_id: Option<i64>,
    pub message: Option<String>,
}

impl IntoRecord<TaskLogPatch> for UpdateTaskLogRequest {
    fn into_record(self) -> ServiceResult<TaskLogPatch> {
        Ok(TaskLogPatch {
            user_id: self.user_id,
            message: non_empty(self.message),
        })
    }
}
