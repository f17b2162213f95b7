/// Contact requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::contact::{ContactPatch, NewContact};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(max = 100))]
    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub company: Option<String>,

    /// Free-form role, e.g. "owner", "tenant", "agent"
    #[validate(length(max = 50))]
    pub contact_type: Option<String>,

    pub notes: Option<String>,
}

impl IntoRecord<NewContact> for CreateContactRequest {
    fn into_record(self) -> ServiceResult<NewContact> {
        Ok(NewContact {
            first_name: self.first_name.trim().to_string(),
            last_name: non_empty(self.last_name),
            email: non_empty(self.email),
            phone: non_empty(self.phone),
            company: non_empty(self.company),
            contact_type: non_empty(self.contact_type),
            notes: non_empty(self.notes),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContactRequest {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,

    #[validate(length(max = 100))]
    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub company: Option<String>,

    #[validate(length(max = 50))]
    pub contact_type: Option<String>,

    pub notes: Option<String>,
}

impl IntoRecord<ContactPatch> for UpdateContactRequest {
    fn into_record(self) -> ServiceResult<ContactPatch> {
        Ok(ContactPatch {
            first_name: non_empty(self.first_name).map(|n| n.trim().to_string()),
            last_name: non_empty(self.last_name),
            email: non_empty(self.email),
            phone: non_empty(self.phone),
            company: non_empty(self.company),
            contact_type: non_empty(self.contact_type),
            notes: non_empty(self.notes),
        })
    }
}
