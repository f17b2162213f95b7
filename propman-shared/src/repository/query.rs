/// Shared query building for the per-entity repositories
///
/// Every entity table has the same bookkeeping columns (`id`, `created_at`,
/// `updated_at`, `deleted_at`), so listing, fetching by id, counting and
/// soft-deleting are written once here against a [`TableSpec`].
///
/// Only `&'static str` identifiers from a `TableSpec` are ever formatted
/// into SQL. Caller-supplied ordering is resolved against the table's
/// sortable columns first; values are always bound.

use crate::error::{RepoResult, RepositoryError};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};
use std::fmt;
use tracing::debug;

/// Static description of an entity table
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    /// Singular entity name used in errors and logs
    pub entity: &'static str,

    /// Table name
    pub table: &'static str,

    /// Selected columns, in struct field order
    pub columns: &'static [&'static str],

    /// Columns accepted by `ListParams::order`
    pub sortable: &'static [&'static str],
}

impl TableSpec {
    /// Comma-separated column list, optionally qualified with a table alias
    pub fn select_list(&self, alias: Option<&str>) -> String {
        match alias {
            Some(alias) => self
                .columns
                .iter()
                .map(|c| format!("{}.{}", alias, c))
                .collect::<Vec<_>>()
                .join(", "),
            None => self.columns.join(", "),
        }
    }

    /// `RETURNING` clause selecting every column
    pub fn returning(&self) -> String {
        format!(" RETURNING {}", self.select_list(None))
    }

    /// Not-found error for this entity
    pub fn not_found(&self, id: i64) -> RepositoryError {
        RepositoryError::NotFound {
            entity: self.entity,
            id,
        }
    }
}

/// Pagination and ordering for `find_all`
///
/// `limit = 0` means unbounded and `offset = 0` means no skip. `order`
/// takes the form `"<column>"` or `"<column> asc|desc"`; `None` (or an
/// empty string) orders by `created_at DESC`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: i64,

    #[serde(default)]
    pub offset: i64,

    #[serde(default)]
    pub order: Option<String>,
}

impl ListParams {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            order: None,
        }
    }

    /// Sets the order clause
    pub fn ordered_by(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Value bound to `LIMIT` (NULL = no limit)
    pub fn sql_limit(&self) -> Option<i64> {
        (self.limit > 0).then_some(self.limit)
    }

    /// Value bound to `OFFSET`
    pub fn sql_offset(&self) -> i64 {
        self.offset.max(0)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// A resolved, injection-safe ORDER BY clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: Direction,
}

impl Default for OrderBy {
    fn default() -> Self {
        Self {
            column: "created_at",
            direction: Direction::Desc,
        }
    }
}

impl OrderBy {
    /// Resolves a caller-supplied order string against the sortable columns
    ///
    /// # Errors
    ///
    /// `RepositoryError::InvalidOrder` when the column is not sortable, the
    /// direction is neither `asc` nor `desc`, or extra tokens follow.
    pub fn parse(order: Option<&str>, sortable: &[&'static str]) -> RepoResult<Self> {
        let raw = match order.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(raw) => raw,
        };

        let mut parts = raw.split_whitespace();
        let requested = parts.next().unwrap_or_default().to_ascii_lowercase();

        let column = sortable
            .iter()
            .copied()
            .find(|c| *c == requested)
            .ok_or_else(|| RepositoryError::InvalidOrder(format!("unknown column '{}'", requested)))?;

        let direction = match parts.next().map(|d| d.to_ascii_lowercase()) {
            None => Direction::Asc,
            Some(d) if d == "asc" => Direction::Asc,
            Some(d) if d == "desc" => Direction::Desc,
            Some(other) => {
                return Err(RepositoryError::InvalidOrder(format!(
                    "unknown direction '{}'",
                    other
                )))
            }
        };

        if parts.next().is_some() {
            return Err(RepositoryError::InvalidOrder(raw.to_string()));
        }

        Ok(Self { column, direction })
    }

    /// Renders the clause with an `id` tiebreaker in the same direction
    pub fn to_sql(&self) -> String {
        let dir = self.direction.as_sql();
        if self.column == "id" {
            format!("id {}", dir)
        } else {
            format!("{} {}, id {}", self.column, dir, dir)
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Lists live rows, optionally restricted to one parent (`column = id`)
pub async fn fetch_page<T>(
    pool: &PgPool,
    spec: &TableSpec,
    params: &ListParams,
    parent: Option<(&'static str, i64)>,
) -> RepoResult<Vec<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let order = OrderBy::parse(params.order.as_deref(), spec.sortable)?;

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "SELECT {} FROM {} WHERE deleted_at IS NULL",
        spec.select_list(None),
        spec.table
    ));

    if let Some((column, parent_id)) = parent {
        qb.push(format!(" AND {} = ", column)).push_bind(parent_id);
    }

    qb.push(format!(" ORDER BY {}", order.to_sql()))
        .push(" LIMIT ")
        .push_bind(params.sql_limit())
        .push(" OFFSET ")
        .push_bind(params.sql_offset());

    debug!(
        entity = spec.entity,
        order = %order,
        limit = params.limit,
        offset = params.offset,
        "Listing records"
    );

    qb.build_query_as::<T>()
        .fetch_all(pool)
        .await
        .map_err(RepositoryError::wrap(spec.entity, "list"))
}

/// Fetches one live row by id, mapping a missing row to `NotFound`
pub async fn fetch_by_id<T>(pool: &PgPool, spec: &TableSpec, id: i64) -> RepoResult<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = format!(
        "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
        spec.select_list(None),
        spec.table
    );

    sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(RepositoryError::wrap(spec.entity, "fetch"))?
        .ok_or(RepositoryError::NotFound {
            entity: spec.entity,
            id,
        })
}

/// Marks a live row as deleted
pub async fn soft_delete(pool: &PgPool, spec: &TableSpec, id: i64) -> RepoResult<()> {
    let sql = format!(
        "UPDATE {} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        spec.table
    );

    let result = sqlx::query(&sql)
        .bind(id)
        .execute(pool)
        .await
        .map_err(RepositoryError::wrap(spec.entity, "delete"))?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound {
            entity: spec.entity,
            id,
        });
    }

    debug!(entity = spec.entity, id, "Soft-deleted record");
    Ok(())
}

/// Counts live rows
pub async fn count_live(pool: &PgPool, spec: &TableSpec) -> RepoResult<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE deleted_at IS NULL",
        spec.table
    );

    let (count,): (i64,) = sqlx::query_as(&sql)
        .fetch_one(pool)
        .await
        .map_err(RepositoryError::wrap(spec.entity, "count"))?;

    Ok(count)
}
