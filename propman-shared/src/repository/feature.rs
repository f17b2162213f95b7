/// Feature repository
///
/// Feature names are unique; inserting or renaming onto an existing name
/// returns `RepositoryError::Conflict`.

use super::query::{self, ListParams, TableSpec};
use super::Repository;
use crate::error::{RepoResult, RepositoryError};
use crate::models::feature::{Feature, FeaturePatch, NewFeature};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

pub(crate) const FEATURES: TableSpec = TableSpec {
    entity: "feature",
    table: "features",
    columns: &["id", "name", "description", "created_at", "updated_at", "deleted_at"],
    sortable: &["id", "name", "created_at", "updated_at"],
};

#[derive(Debug, Clone)]
pub struct PgFeatureRepository {
    pool: PgPool,
}

impl PgFeatureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgFeatureRepository {
    type Entity = Feature;
    type Create = NewFeature;
    type Patch = FeaturePatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<Feature>> {
        query::fetch_page(&self.pool, &FEATURES, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Feature> {
        query::fetch_by_id(&self.pool, &FEATURES, id).await
    }

    async fn create(&self, data: NewFeature) -> RepoResult<Feature> {
        let sql = format!(
            "INSERT INTO features (name, description) VALUES ($1, $2){}",
            FEATURES.returning()
        );

        let feature = sqlx::query_as::<_, Feature>(&sql)
            .bind(data.name)
            .bind(data.description)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::wrap(FEATURES.entity, "insert"))?;

        info!(feature_id = feature.id, name = %feature.name, "Created feature");
        Ok(feature)
    }

    async fn update(&self, id: i64, patch: FeaturePatch) -> RepoResult<Feature> {
        let mut feature = self.find_by_id(id).await?;
        patch.apply(&mut feature);

        let sql = format!(
            "UPDATE features SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL{}",
            FEATURES.returning()
        );

        sqlx::query_as::<_, Feature>(&sql)
            .bind(id)
            .bind(feature.name)
            .bind(feature.description)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::wrap(FEATURES.entity, "update"))?
            .ok_or_else(|| FEATURES.not_found(id))
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &FEATURES, id).await?;
        info!(feature_id = id, "Deleted feature");
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &FEATURES).await
    }
}
