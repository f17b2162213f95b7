/// Many-to-many join table management
///
/// Updating an association list follows one rule for every join table:
/// when the owner already has links, the list replaces them; when it has
/// none, the list is appended. A replace deletes and rewrites the owner's
/// links inside one transaction.
///
/// # Join tables
///
/// ```text
/// property_features     property    <-> feature
/// property_contacts     property    <-> contact
/// assignments           task        <-> user
/// transaction_contacts  transaction <-> contact
/// vendor_work_types     vendor      <-> work_type
/// ```

use crate::error::{RepoResult, RepositoryError};
use crate::repository::query::TableSpec;
use sqlx::{postgres::PgRow, FromRow, PgPool};
use tracing::debug;

/// How an association list was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationMode {
    /// Links were added alongside (zero) existing links
    Append,

    /// Existing links were removed and rewritten
    Replace,
}

impl AssociationMode {
    /// Picks the write mode from the number of links the owner already has
    pub fn for_existing(existing_links: usize) -> Self {
        if existing_links == 0 {
            AssociationMode::Append
        } else {
            AssociationMode::Replace
        }
    }
}

/// Static description of a join table
#[derive(Debug, Clone, Copy)]
pub struct JoinTable {
    pub table: &'static str,
    pub owner_column: &'static str,
    pub target_column: &'static str,
}

pub const PROPERTY_FEATURES: JoinTable = JoinTable {
    table: "property_features",
    owner_column: "property_id",
    target_column: "feature_id",
};

pub const PROPERTY_CONTACTS: JoinTable = JoinTable {
    table: "property_contacts",
    owner_column: "property_id",
    target_column: "contact_id",
};

pub const ASSIGNMENTS: JoinTable = JoinTable {
    table: "assignments",
    owner_column: "task_id",
    target_column: "user_id",
};

pub const TRANSACTION_CONTACTS: JoinTable = JoinTable {
    table: "transaction_contacts",
    owner_column: "transaction_id",
    target_column: "contact_id",
};

pub const VENDOR_WORK_TYPES: JoinTable = JoinTable {
    table: "vendor_work_types",
    owner_column: "vendor_id",
    target_column: "work_type_id",
};

impl JoinTable {
    fn wrap(&self, op: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
        RepositoryError::wrap(self.table, op)
    }

    fn insert_sql(&self) -> String {
        format!(
            "INSERT INTO {} ({}, {}) SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
            self.table, self.owner_column, self.target_column
        )
    }

    /// Ids currently linked to the owner
    pub async fn linked_ids(&self, pool: &PgPool, owner_id: i64) -> RepoResult<Vec<i64>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
            self.target_column, self.table, self.owner_column, self.target_column
        );

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(owner_id)
            .fetch_all(pool)
            .await
            .map_err(self.wrap("list links"))
    }

    /// Adds links, ignoring ones that already exist
    pub async fn append(&self, pool: &PgPool, owner_id: i64, target_ids: &[i64]) -> RepoResult<u64> {
        if target_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(&self.insert_sql())
            .bind(owner_id)
            .bind(target_ids)
            .execute(pool)
            .await
            .map_err(self.wrap("append links"))?;

        debug!(
            join_table = self.table,
            owner_id,
            added = result.rows_affected(),
            "Appended associations"
        );

        Ok(result.rows_affected())
    }

    /// Replaces the owner's links with exactly `target_ids`
    pub async fn replace(&self, pool: &PgPool, owner_id: i64, target_ids: &[i64]) -> RepoResult<()> {
        let mut tx = pool.begin().await.map_err(self.wrap("begin replace"))?;

        let delete_sql = format!("DELETE FROM {} WHERE {} = $1", self.table, self.owner_column);
        sqlx::query(&delete_sql)
            .bind(owner_id)
            .execute(&mut *tx)
            .await
            .map_err(self.wrap("clear links"))?;

        if !target_ids.is_empty() {
            sqlx::query(&self.insert_sql())
                .bind(owner_id)
                .bind(target_ids)
                .execute(&mut *tx)
                .await
                .map_err(self.wrap("replace links"))?;
        }

        tx.commit().await.map_err(self.wrap("commit replace"))?;

        debug!(
            join_table = self.table,
            owner_id,
            links = target_ids.len(),
            "Replaced associations"
        );

        Ok(())
    }

    /// Writes an association list from an update, choosing append or replace
    pub async fn sync(&self, pool: &PgPool, owner_id: i64, target_ids: &[i64]) -> RepoResult<AssociationMode> {
        let existing = self.linked_ids(pool, owner_id).await?;

        let mode = AssociationMode::for_existing(existing.len());
        match mode {
            AssociationMode::Append => {
                self.append(pool, owner_id, target_ids).await?;
            }
            AssociationMode::Replace => {
                self.replace(pool, owner_id, target_ids).await?;
            }
        }

        Ok(mode)
    }

    /// Loads the live target rows linked to the owner
    pub async fn load_linked<T>(&self, pool: &PgPool, target: &TableSpec, owner_id: i64) -> RepoResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = format!(
            "SELECT {} FROM {} t JOIN {} j ON j.{} = t.id \
             WHERE j.{} = $1 AND t.deleted_at IS NULL ORDER BY t.id",
            target.select_list(Some("t")),
            target.table,
            self.table,
            self.target_column,
            self.owner_column
        );

        sqlx::query_as::<_, T>(&sql)
            .bind(owner_id)
            .fetch_all(pool)
            .await
            .map_err(RepositoryError::wrap(target.entity, "load linked"))
    }
}
