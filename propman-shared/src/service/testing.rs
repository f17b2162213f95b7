//! In-memory repositories for service unit tests

use crate::error::{RepoResult, RepositoryError};
use crate::models::feature::{Feature, FeaturePatch, NewFeature};
use crate::models::property::{sample_property, NewProperty, Property, PropertyPatch};
use crate::models::property_attachment::{
    NewPropertyAttachment, PropertyAttachment, PropertyAttachmentPatch,
};
use crate::models::user::{NewUser, User, UserPatch};
use crate::repository::{ListParams, PropertyAttachmentRepository, Repository, UserRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

/// Rows plus the next id to hand out
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn not_found(entity: &'static str, id: i64) -> RepositoryError {
    RepositoryError::NotFound { entity, id }
}

fn page<T: Clone>(rows: &[T], params: &ListParams) -> Vec<T> {
    let skip = params.sql_offset() as usize;
    let take = params.sql_limit().map(|l| l as usize).unwrap_or(usize::MAX);
    rows.iter().rev().skip(skip).take(take).cloned().collect()
}

#[derive(Debug, Default)]
pub(crate) struct InMemoryFeatures {
    table: Mutex<Table<Feature>>,
}

impl InMemoryFeatures {
    pub(crate) fn len(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl Repository for InMemoryFeatures {
    type Entity = Feature;
    type Create = NewFeature;
    type Patch = FeaturePatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<Feature>> {
        Ok(page(&self.table.lock().unwrap().rows, params))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Feature> {
        self.table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| not_found("feature", id))
    }

    async fn create(&self, data: NewFeature) -> RepoResult<Feature> {
        let mut table = self.table.lock().unwrap();
        let now = Utc::now();
        let feature = Feature {
            id: table.allocate_id(),
            name: data.name,
            description: data.description,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.push(feature.clone());
        Ok(feature)
    }

    async fn update(&self, id: i64, patch: FeaturePatch) -> RepoResult<Feature> {
        let mut table = self.table.lock().unwrap();
        let feature = table
            .rows
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| not_found("feature", id))?;
        patch.apply(feature);
        feature.updated_at = Utc::now();
        Ok(feature.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|f| f.id != id);
        if table.rows.len() == before {
            return Err(not_found("feature", id));
        }
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.len() as i64)
    }
}

#[derive(Debug, Default)]
pub(crate) struct InMemoryUsers {
    table: Mutex<Table<User>>,
}

#[async_trait]
impl Repository for InMemoryUsers {
    type Entity = User;
    type Create = NewUser;
    type Patch = UserPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<User>> {
        Ok(page(&self.table.lock().unwrap().rows, params))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<User> {
        self.table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| not_found("user", id))
    }

    async fn create(&self, data: NewUser) -> RepoResult<User> {
        let mut table = self.table.lock().unwrap();
        if table.rows.iter().any(|u| u.email == data.email) {
            return Err(RepositoryError::Conflict {
                entity: "user",
                constraint: "users_email_key".to_string(),
            });
        }

        let now = Utc::now();
        let user = User {
            id: table.allocate_id(),
            email: data.email,
            password_hash: data.password_hash,
            first_name: data.first_name,
            last_name: data.last_name,
            phone: data.phone,
            role: data.role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> RepoResult<User> {
        let mut table = self.table.lock().unwrap();
        let user = table
            .rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("user", id))?;
        patch.apply(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|u| u.id != id);
        if table.rows.len() == before {
            return Err(not_found("user", id));
        }
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.table.lock().unwrap().rows.len() as i64)
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// Read-only property store seeded with fixed rows
#[derive(Debug, Default)]
pub(crate) struct InMemoryProperties {
    rows: Vec<Property>,
}

impl InMemoryProperties {
    pub(crate) fn with_ids(ids: &[i64]) -> Self {
        Self {
            rows: ids
                .iter()
                .map(|id| sample_property(*id, &format!("Property {}", id)))
                .collect(),
        }
    }
}

#[async_trait]
impl Repository for InMemoryProperties {
    type Entity = Property;
    type Create = NewProperty;
    type Patch = PropertyPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<Property>> {
        Ok(page(&self.rows, params))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Property> {
        self.rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("property", id))
    }

    async fn create(&self, _data: NewProperty) -> RepoResult<Property> {
        unimplemented!("read-only test store")
    }

    async fn update(&self, _id: i64, _patch: PropertyPatch) -> RepoResult<Property> {
        unimplemented!("read-only test store")
    }

    async fn delete(&self, _id: i64) -> RepoResult<()> {
        unimplemented!("read-only test store")
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.rows.len() as i64)
    }
}

#[derive(Debug, Default)]
pub(crate) struct InMemoryAttachments {
    table: Mutex<Table<PropertyAttachment>>,
}

impl InMemoryAttachments {
    pub(crate) fn len(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl Repository for InMemoryAttachments {
    type Entity = PropertyAttachment;
    type Create = NewPropertyAttachment;
    type Patch = PropertyAttachmentPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<PropertyAttachment>> {
        Ok(page(&self.table.lock().unwrap().rows, params))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<PropertyAttachment> {
        self.table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found("property_attachment", id))
    }

    async fn create(&self, data: NewPropertyAttachment) -> RepoResult<PropertyAttachment> {
        let mut table = self.table.lock().unwrap();
        let now = Utc::now();
        let attachment = PropertyAttachment {
            id: table.allocate_id(),
            property_id: data.property_id,
            filename: data.filename,
            size: data.size,
            content_type: data.content_type,
            storage_key: data.storage_key,
            etag: data.etag,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.push(attachment.clone());
        Ok(attachment)
    }

    async fn update(&self, id: i64, patch: PropertyAttachmentPatch) -> RepoResult<PropertyAttachment> {
        let mut table = self.table.lock().unwrap();
        let attachment = table
            .rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found("property_attachment", id))?;
        patch.apply(attachment);
        Ok(attachment.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|a| a.id != id);
        if table.rows.len() == before {
            return Err(not_found("property_attachment", id));
        }
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.len() as i64)
    }
}

#[async_trait]
impl PropertyAttachmentRepository for InMemoryAttachments {
    async fn find_by_property(&self, property_id: i64) -> RepoResult<Vec<PropertyAttachment>> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .rev()
            .filter(|a| a.property_id == property_id)
            .cloned()
            .collect())
    }
}
