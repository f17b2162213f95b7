/// Contact repository

use super::query::{self, ListParams, TableSpec};
use super::Repository;
use crate::error::{RepoResult, RepositoryError};
use crate::models::contact::{Contact, ContactPatch, NewContact};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

pub(crate) const CONTACTS: TableSpec = TableSpec {
    entity: "contact",
    table: "contacts",
    columns: &[
        "id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "company",
        "contact_type",
        "notes",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &[
        "id",
        "first_name",
        "last_name",
        "email",
        "company",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgContactRepository {
    type Entity = Contact;
    type Create = NewContact;
    type Patch = ContactPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<Contact>> {
        query::fetch_page(&self.pool, &CONTACTS, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Contact> {
        query::fetch_by_id(&self.pool, &CONTACTS, id).await
    }

    async fn create(&self, data: NewContact) -> RepoResult<Contact> {
        let sql = format!(
            "INSERT INTO contacts (first_name, last_name, email, phone, company, contact_type, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7){}",
            CONTACTS.returning()
        );

        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(data.first_name)
            .bind(data.last_name)
            .bind(data.email)
            .bind(data.phone)
            .bind(data.company)
            .bind(data.contact_type)
            .bind(data.notes)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::wrap(CONTACTS.entity, "insert"))?;

        info!(contact_id = contact.id, "Created contact");
        Ok(contact)
    }

    async fn update(&self, id: i64, patch: ContactPatch) -> RepoResult<Contact> {
        let mut contact = self.find_by_id(id).await?;
        patch.apply(&mut contact);

        let sql = format!(
            "UPDATE contacts SET first_name = $2, last_name = $3, email = $4, phone = $5, \
             company = $6, contact_type = $7, notes = $8, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL{}",
            CONTACTS.returning()
        );

        sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .bind(contact.first_name)
            .bind(contact.last_name)
            .bind(contact.email)
            .bind(contact.phone)
            .bind(contact.company)
            .bind(contact.contact_type)
            .bind(contact.notes)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::wrap(CONTACTS.entity, "update"))?
            .ok_or_else(|| CONTACTS.not_found(id))
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &CONTACTS, id).await?;
        info!(contact_id = id, "Deleted contact");
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &CONTACTS).await
    }
}
