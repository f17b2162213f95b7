/// User repository
///
/// Email addresses are unique across all rows, including soft-deleted
/// ones; a duplicate surfaces as `RepositoryError::Conflict`.

use super::query::{self, ListParams, TableSpec};
use super::{Repository, UserRepository};
use crate::error::{RepoResult, RepositoryError};
use crate::models::user::{NewUser, User, UserPatch};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

pub(crate) const USERS: TableSpec = TableSpec {
    entity: "user",
    table: "users",
    columns: &[
        "id",
        "email",
        "password_hash",
        "first_name",
        "last_name",
        "phone",
        "role",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &[
        "id",
        "email",
        "first_name",
        "last_name",
        "role",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgUserRepository {
    type Entity = User;
    type Create = NewUser;
    type Patch = UserPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<User>> {
        query::fetch_page(&self.pool, &USERS, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<User> {
        query::fetch_by_id(&self.pool, &USERS, id).await
    }

    async fn create(&self, data: NewUser) -> RepoResult<User> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, first_name, last_name, phone, role) \
             VALUES ($1, $2, $3, $4, $5, $6){}",
            USERS.returning()
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(data.email)
            .bind(data.password_hash)
            .bind(data.first_name)
            .bind(data.last_name)
            .bind(data.phone)
            .bind(data.role)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::wrap(USERS.entity, "insert"))?;

        info!(user_id = user.id, role = user.role.as_str(), "Created user");
        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> RepoResult<User> {
        let mut user = self.find_by_id(id).await?;
        patch.apply(&mut user);

        let sql = format!(
            "UPDATE users SET email = $2, password_hash = $3, first_name = $4, last_name = $5, \
             phone = $6, role = $7, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL{}",
            USERS.returning()
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.phone)
            .bind(user.role)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::wrap(USERS.entity, "update"))?
            .ok_or_else(|| USERS.not_found(id))?;

        debug!(
            user_id = id,
            password_changed = patch.password_hash.is_some(),
            "Updated user"
        );

        Ok(user)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &USERS, id).await?;
        info!(user_id = id, "Deleted user");
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &USERS).await
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL",
            USERS.select_list(None)
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::wrap(USERS.entity, "find by email"))
    }
}
