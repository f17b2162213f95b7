/// Vendor model: a service provider, linked to the work types it performs
/// through `vendor_work_types`.

use super::work_type::WorkType;
use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,

    #[sqlx(skip)]
    #[serde(default)]
    pub work_types: Vec<WorkType>,
}

#[derive(Debug, Clone)]
pub struct NewVendor {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub work_type_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct VendorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub work_type_ids: Option<Vec<i64>>,
}

impl VendorPatch {
    pub fn apply(&self, vendor: &mut Vendor) {
        patch_field(&mut vendor.name, &self.name);
        patch_nullable(&mut vendor.email, &self.email);
        patch_nullable(&mut vendor.phone, &self.phone);
        patch_nullable(&mut vendor.address, &self.address);
        patch_nullable(&mut vendor.notes, &self.notes);
    }
}
