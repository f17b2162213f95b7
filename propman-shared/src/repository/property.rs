/// Property repository
///
/// `find_by_id` eager-loads the property's features, log entries and
/// contacts. Creating or updating a property writes the `property_features`
/// and `property_contacts` join rows for any supplied id lists.

use super::associations::{PROPERTY_CONTACTS, PROPERTY_FEATURES};
use super::contact::CONTACTS;
use super::feature::FEATURES;
use super::property_log::PROPERTY_LOGS;
use super::query::{self, ListParams, TableSpec};
use super::Repository;
use crate::error::{RepoResult, RepositoryError};
use crate::models::contact::Contact;
use crate::models::feature::Feature;
use crate::models::property::{NewProperty, Property, PropertyPatch};
use crate::models::property_log::PropertyLog;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

pub(crate) const PROPERTIES: TableSpec = TableSpec {
    entity: "property",
    table: "properties",
    columns: &[
        "id",
        "name",
        "description",
        "address",
        "city",
        "state",
        "postal_code",
        "property_type",
        "status",
        "bedrooms",
        "bathrooms",
        "square_feet",
        "price",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &[
        "id",
        "name",
        "city",
        "state",
        "postal_code",
        "property_type",
        "status",
        "bedrooms",
        "bathrooms",
        "square_feet",
        "price",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone)]
pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_relations(&self, property: &mut Property) -> RepoResult<()> {
        let unbounded = ListParams::default();
        let (features, logs, contacts) = futures::try_join!(
            PROPERTY_FEATURES.load_linked::<Feature>(&self.pool, &FEATURES, property.id),
            query::fetch_page::<PropertyLog>(
                &self.pool,
                &PROPERTY_LOGS,
                &unbounded,
                Some(("property_id", property.id)),
            ),
            PROPERTY_CONTACTS.load_linked::<Contact>(&self.pool, &CONTACTS, property.id),
        )?;

        debug!(
            property_id = property.id,
            features = features.len(),
            logs = logs.len(),
            contacts = contacts.len(),
            "Loaded property relations"
        );

        property.features = features;
        property.logs = logs;
        property.contacts = contacts;
        Ok(())
    }
}

#[async_trait]
impl Repository for PgPropertyRepository {
    type Entity = Property;
    type Create = NewProperty;
    type Patch = PropertyPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<Property>> {
        query::fetch_page(&self.pool, &PROPERTIES, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Property> {
        let mut property: Property = query::fetch_by_id(&self.pool, &PROPERTIES, id).await?;
        self.load_relations(&mut property).await?;
        Ok(property)
    }

    async fn create(&self, data: NewProperty) -> RepoResult<Property> {
        let sql = "INSERT INTO properties \
                   (name, description, address, city, state, postal_code, property_type, status, \
                    bedrooms, bathrooms, square_feet, price) \
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
                   RETURNING id";

        let id: i64 = sqlx::query_scalar(sql)
            .bind(&data.name)
            .bind(&data.description)
            .bind(&data.address)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.postal_code)
            .bind(&data.property_type)
            .bind(&data.status)
            .bind(data.bedrooms)
            .bind(data.bathrooms)
            .bind(data.square_feet)
            .bind(data.price)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::wrap(PROPERTIES.entity, "insert"))?;

        PROPERTY_FEATURES.append(&self.pool, id, &data.feature_ids).await?;
        PROPERTY_CONTACTS.append(&self.pool, id, &data.contact_ids).await?;

        info!(property_id = id, name = %data.name, "Created property");

        self.find_by_id(id).await
    }

    async fn update(&self, id: i64, patch: PropertyPatch) -> RepoResult<Property> {
        let mut property = self.find_by_id(id).await?;
        patch.apply(&mut property);

        let result = sqlx::query(
            "UPDATE properties SET name = $2, description = $3, address = $4, city = $5, \
             state = $6, postal_code = $7, property_type = $8, status = $9, bedrooms = $10, \
             bathrooms = $11, square_feet = $12, price = $13, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(&property.name)
        .bind(&property.description)
        .bind(&property.address)
        .bind(&property.city)
        .bind(&property.state)
        .bind(&property.postal_code)
        .bind(&property.property_type)
        .bind(&property.status)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.square_feet)
        .bind(property.price)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::wrap(PROPERTIES.entity, "update"))?;

        if result.rows_affected() == 0 {
            return Err(PROPERTIES.not_found(id));
        }

        if let Some(feature_ids) = &patch.feature_ids {
            let mode = PROPERTY_FEATURES.sync(&self.pool, id, feature_ids).await?;
            debug!(property_id = id, ?mode, "Synced property features");
        }

        if let Some(contact_ids) = &patch.contact_ids {
            let mode = PROPERTY_CONTACTS.sync(&self.pool, id, contact_ids).await?;
            debug!(property_id = id, ?mode, "Synced property contacts");
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &PROPERTIES, id).await?;
        info!(property_id = id, "Deleted property");
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &PROPERTIES).await
    }
}
