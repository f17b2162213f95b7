/// Maintenance request requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::maintenance_request::{
    MaintenanceRequestPatch, NewMaintenanceRequest, DEFAULT_REQUEST_STATUS,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaintenanceRequestRequest {
    #[validate(range(min = 1))]
    pub property_id: i64,

    pub vendor_id: Option<i64>,
    pub work_type_id: Option<i64>,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    pub description: Option<String>,

    /// Defaults to `open`
    #[validate(length(max = 50))]
    pub status: Option<String>,

    #[validate(length(max = 50))]
    pub priority: Option<String>,

    pub scheduled_for: Option<DateTime<Utc>>,

    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
}

impl IntoRecord<NewMaintenanceRequest> for CreateMaintenanceRequestRequest {
    fn into_record(self) -> ServiceResult<NewMaintenanceRequest> {
        Ok(NewMaintenanceRequest {
            property_id: self.property_id,
            vendor_id: self.vendor_id,
            work_type_id: self.work_type_id,
            title: self.title.trim().to_string(),
            description: non_empty(self.description),
            status: non_empty(self.status).unwrap_or_else(|| DEFAULT_REQUEST_STATUS.to_string()),
            priority: non_empty(self.priority),
            scheduled_for: self.scheduled_for,
            cost: self.cost,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMaintenanceRequestRequest {
    pub property_id: Option<i64>,
    pub vendor_id: Option<i64>,
    pub work_type_id: Option<i64>,

    #[validate(length(max = 255))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub status: Option<String>,

    #[validate(length(max = 50))]
    pub priority: Option<String>,

    pub scheduled_for: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
}

impl IntoRecord<MaintenanceRequestPatch> for UpdateMaintenanceRequestRequest {
    fn into_record(self) -> ServiceResult<MaintenanceRequestPatch> {
        Ok(MaintenanceRequestPatch {
            property_id: self.property_id,
            vendor_id: self.vendor_id,
            work_type_id: self.work_type_id,
            title: non_empty(self.title).map(|t| t.trim().to_string()),
            description: non_empty(self.description),
            status: non_empty(self.status),
            priority: non_empty(self.priority),
            scheduled_for: self.scheduled_for,
            completed_at: self.completed_at,
            cost: self.cost,
        })
    }
}
