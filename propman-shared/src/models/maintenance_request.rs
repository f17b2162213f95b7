/// Maintenance request model
///
/// Raised against a property, optionally routed to a vendor and tagged
/// with the kind of work needed.

use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status given to requests created without one
pub const DEFAULT_REQUEST_STATUS: &str = "open";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MaintenanceRequest {
    pub id: i64,
    pub property_id: i64,
    pub vendor_id: Option<i64>,
    pub work_type_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewMaintenanceRequest {
    pub property_id: i64,
    pub vendor_id: Option<i64>,
    pub work_type_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct MaintenanceRequestPatch {
    pub property_id: Option<i64>,
    pub vendor_id: Option<i64>,
    pub work_type_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
}

impl MaintenanceRequestPatch {
    pub fn apply(&self, request: &mut MaintenanceRequest) {
        patch_field(&mut request.property_id, &self.property_id);
        patch_nullable(&mut request.vendor_id, &self.vendor_id);
        patch_nullable(&mut request.work_type_id, &self.work_type_id);
        patch_field(&mut request.title, &self.title);
        patch_nullable(&mut request.description, &self.description);
        patch_field(&mut request.status, &self.status);
        patch_nullable(&mut request.priority, &self.priority);
        patch_nullable(&mut request.scheduled_for, &self.scheduled_for);
        patch_nullable(&mut request.completed_at, &self.completed_at);
        patch_nullable(&mut request.cost, &self.cost);
    }
}
