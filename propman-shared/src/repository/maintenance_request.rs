/// Maintenance request repository

use super::query::{self, ListParams, TableSpec};
use super::Repository;
use crate::error::{RepoResult, RepositoryError};
use crate::models::maintenance_request::{
    MaintenanceRequest, MaintenanceRequestPatch, NewMaintenanceRequest,
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

pub(crate) const MAINTENANCE_REQUESTS: TableSpec = TableSpec {
    entity: "maintenance_request",
    table: "maintenance_requests",
    columns: &[
        "id",
        "property_id",
        "vendor_id",
        "work_type_id",
        "title",
        "description",
        "status",
        "priority",
        "scheduled_for",
        "completed_at",
        "cost",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &[
        "id",
        "property_id",
        "vendor_id",
        "title",
        "status",
        "priority",
        "scheduled_for",
        "completed_at",
        "cost",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone)]
pub struct PgMaintenanceRequestRepository {
    pool: PgPool,
}

impl PgMaintenanceRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgMaintenanceRequestRepository {
    type Entity = MaintenanceRequest;
    type Create = NewMaintenanceRequest;
    type Patch = MaintenanceRequestPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<MaintenanceRequest>> {
        query::fetch_page(&self.pool, &MAINTENANCE_REQUESTS, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<MaintenanceRequest> {
        query::fetch_by_id(&self.pool, &MAINTENANCE_REQUESTS, id).await
    }

    async fn create(&self, data: NewMaintenanceRequest) -> RepoResult<MaintenanceRequest> {
        let sql = format!(
            "INSERT INTO maintenance_requests \
             (property_id, vendor_id, work_type_id, title, description, status, priority, \
              scheduled_for, cost) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9){}",
            MAINTENANCE_REQUESTS.returning()
        );

        let request = sqlx::query_as::<_, MaintenanceRequest>(&sql)
            .bind(data.property_id)
            .bind(data.vendor_id)
            .bind(data.work_type_id)
            .bind(data.title)
            .bind(data.description)
            .bind(data.status)
            .bind(data.priority)
            .bind(data.scheduled_for)
            .bind(data.cost)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::wrap(MAINTENANCE_REQUESTS.entity, "insert"))?;

        info!(
            request_id = request.id,
            property_id = request.property_id,
            "Created maintenance request"
        );

        Ok(request)
    }

    async fn update(&self, id: i64, patch: MaintenanceRequestPatch) -> RepoResult<MaintenanceRequest> {
        let mut request = self.find_by_id(id).await?;
        patch.apply(&mut request);

        let sql = format!(
            "UPDATE maintenance_requests SET property_id = $2, vendor_id = $3, work_type_id = $4, \
             title = $5, description = $6, status = $7, priority = $8, scheduled_for = $9, \
             completed_at = $10, cost = $11, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL{}",
            MAINTENANCE_REQUESTS.returning()
        );

        sqlx::query_as::<_, MaintenanceRequest>(&sql)
            .bind(id)
            .bind(request.property_id)
            .bind(request.vendor_id)
            .bind(request.work_type_id)
            .bind(request.title)
            .bind(request.description)
            .bind(request.status)
            .bind(request.priority)
            .bind(request.scheduled_for)
            .bind(request.completed_at)
            .bind(request.cost)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::wrap(MAINTENANCE_REQUESTS.entity, "update"))?
            .ok_or_else(|| MAINTENANCE_REQUESTS.not_found(id))
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &MAINTENANCE_REQUESTS, id).await?;
        info!(request_id = id, "Deleted maintenance request");
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &MAINTENANCE_REQUESTS).await
    }
}
