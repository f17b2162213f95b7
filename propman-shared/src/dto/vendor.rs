/// Vendor requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::vendor::{NewVendor, VendorPatch};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVendorRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    pub notes: Option<String>,

    #[serde(default)]
    pub work_type_ids: Vec<i64>,
}

impl IntoRecord<NewVendor> for CreateVendorRequest {
    fn into_record(self) -> ServiceResult<NewVendor> {
        Ok(NewVendor {
            name: self.name.trim().to_string(),
            email: non_empty(self.email),
            phone: non_empty(self.phone),
            address: non_empty(self.address),
            notes: non_empty(self.notes),
            work_type_ids: self.work_type_ids,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVendorRequest {
    #[validate(length(max = 255))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    pub notes: Option<String>,
    pub work_type_ids: Option<Vec<i64>>,
}

impl IntoRecord<VendorPatch> for UpdateVendorRequest {
    fn into_record(self) -> ServiceResult<VendorPatch> {
        Ok(VendorPatch {
            name: non_empty(self.name).map(|n| n.trim().to_string()),
            email: non_empty(self.email),
            phone: non_empty(self.phone),
            address: non_empty(self.address),
            notes: non_empty(self.notes),
            work_type_ids: self.work_type_ids,
        })
    }
}
