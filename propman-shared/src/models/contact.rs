/// Contact model
///
/// Contacts are owners, tenants, agents or anyone else related to a
/// property or a transaction. `contact_type` is free text.

use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub contact_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub contact_type: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub contact_type: Option<String>,
    pub notes: Option<String>,
}

impl ContactPatch {
    pub fn apply(&self, contact: &mut Contact) {
        patch_field(&mut contact.first_name, &self.first_name);
        patch_nullable(&mut contact.last_name, &self.last_name);
        patch_nullable(&mut contact.email, &self.email);
        patch_nullable(&mut contact.phone, &self.phone);
        patch_nullable(&mut contact.company, &self.company);
        patch_nullable(&mut contact.contact_type, &self.contact_type);
        patch_nullable(&mut contact.notes, &self.notes);
    }
}
