/// Vendor repository

use super::associations::VENDOR_WORK_TYPES;
use super::query::{self, ListParams, TableSpec};
use super::work_type::WORK_TYPES;
use super::Repository;
use crate::error::{RepoResult, RepositoryError};
use crate::models::vendor::{NewVendor, Vendor, VendorPatch};
use crate::models::work_type::WorkType;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

pub(crate) const VENDORS: TableSpec = TableSpec {
    entity: "vendor",
    table: "vendors",
    columns: &[
        "id",
        "name",
        "email",
        "phone",
        "address",
        "notes",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &["id", "name", "email", "created_at", "updated_at"],
};

#[derive(Debug, Clone)]
pub struct PgVendorRepository {
    pool: PgPool,
}

impl PgVendorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgVendorRepository {
    type Entity = Vendor;
    type Create = NewVendor;
    type Patch = VendorPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<Vendor>> {
        query::fetch_page(&self.pool, &VENDORS, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Vendor> {
        let mut vendor: Vendor = query::fetch_by_id(&self.pool, &VENDORS, id).await?;
        vendor.work_types = VENDOR_WORK_TYPES
            .load_linked::<WorkType>(&self.pool, &WORK_TYPES, id)
            .await?;
        Ok(vendor)
    }

    async fn create(&self, data: NewVendor) -> RepoResult<Vendor> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO vendors (name, email, phone, address, notes) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::wrap(VENDORS.entity, "insert"))?;

        VENDOR_WORK_TYPES.append(&self.pool, id, &data.work_type_ids).await?;

        info!(vendor_id = id, name = %data.name, "Created vendor");

        self.find_by_id(id).await
    }

    async fn update(&self, id: i64, patch: VendorPatch) -> RepoResult<Vendor> {
        let mut vendor = self.find_by_id(id).await?;
        patch.apply(&mut vendor);

        let result = sqlx::query(
            "UPDATE vendors SET name = $2, email = $3, phone = $4, address = $5, notes = $6, \
             updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(&vendor.name)
        .bind(&vendor.email)
        .bind(&vendor.phone)
        .bind(&vendor.address)
        .bind(&vendor.notes)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::wrap(VENDORS.entity, "update"))?;

        if result.rows_affected() == 0 {
            return Err(VENDORS.not_found(id));
        }

        if let Some(work_type_ids) = &patch.work_type_ids {
            let mode = VENDOR_WORK_TYPES.sync(&self.pool, id, work_type_ids).await?;
            debug!(vendor_id = id, ?mode, "Synced vendor work types");
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &VENDORS, id).await?;
        info!(vendor_id = id, "Deleted vendor");
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &VENDORS).await
    }
}
