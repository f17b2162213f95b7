/// Work type model: a trade such as plumbing, electrical or landscaping

use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewWorkType {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkTypePatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl WorkTypePatch {
    pub fn apply(&self, work_type: &mut WorkType) {
        patch_field(&mut work_type.name, &self.name);
        patch_nullable(&mut work_type.description, &self.description);
    }
}
