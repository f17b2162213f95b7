/// Work type requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::work_type::{NewWorkType, WorkTypePatch};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWorkTypeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub description: Option<String>,
}

impl IntoRecord<NewWorkType> for CreateWorkTypeRequest {
    fn into_record(self) -> ServiceResult<NewWorkType> {
        Ok(NewWorkType {
            name: self.name.trim().to_string(),
            description: non_empty(self.description),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWorkTypeRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,

    pub description: Option<String>,
}

impl IntoRecord<WorkTypePatch> for UpdateWorkTypeRequest {
    fn into_record(self) -> ServiceResult<WorkTypePatch> {
        Ok(WorkTypePatch {
            name: non_empty(self.name).map(|n| n.trim().to_string()),
            description: non_empty(self.description),
        })
    }
}
