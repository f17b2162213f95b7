/// Property log requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::property_log::{NewPropertyLog, PropertyLogPatch};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePropertyLogRequest {
    #[validate(range(min = 1))]
    pub property_id: i64,

    /// Author, if the entry was written by a user
    pub user_id: Option<i64>,

    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: String,
}

impl IntoRecord<NewPropertyLog> for CreatePropertyLogRequest {
    fn into_record(self) -> ServiceResult<NewPropertyLog> {
        Ok(NewPropertyLog {
            property_id: self.property_id,
            user_id: self.user_id,
            message: self.message,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePropertyLogRequest {
    pub user_id: Option<i64>,
    pub message: Option<String>,
}

impl IntoRecord<PropertyLogPatch> for UpdatePropertyLogRequest {
    fn into_record(self) -> ServiceResult<PropertyLogPatch> {
        Ok(PropertyLogPatch {
            user_id: self.user_id,
            message: non_empty(self.message),
        })
    }
}
