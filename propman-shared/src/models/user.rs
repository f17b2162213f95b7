/// User model
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('user', 'manager', 'admin');
///
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     email VARCHAR(255) NOT NULL,            -- unique
///     password_hash VARCHAR(255) NOT NULL,    -- Argon2id PHC string
///     first_name VARCHAR(100),
///     last_name VARCHAR(100),
///     phone VARCHAR(50),
///     role user_role NOT NULL DEFAULT 'user',
///     created_at, updated_at, deleted_at
/// );
/// ```

use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access role of a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular account; assigned when no role is given
    #[default]
    User,

    /// Manages properties, vendors and tasks
    Manager,

    /// Full access
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "manager" => Ok(UserRole::Manager),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// User account
///
/// `password_hash` is skipped when serializing so it never leaves the
/// process in a response body.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,

    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// "First Last", falling back to the email address
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Insert shape for a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Patch for a user. `password_hash = None` keeps the stored hash.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
}

impl UserPatch {
    pub fn apply(&self, user: &mut User) {
        patch_field(&mut user.email, &self.email);
        patch_field(&mut user.password_hash, &self.password_hash);
        patch_nullable(&mut user.first_name, &self.first_name);
        patch_nullable(&mut user.last_name, &self.last_name);
        patch_nullable(&mut user.phone, &self.phone);
        patch_field(&mut user.role, &self.role);
    }
}

#[cfg(test)]
pub(crate) fn sample_user(id: i64) -> User {
    let now = Utc::now();
    User {
        id,
        email: format!("user{}@example.com", id),
        password_hash: "$argon2id$v=19$m=65536,t=3,p=4$c2FsdA$aGFzaA".to_string(),
        first_name: None,
        last_name: None,
        phone: None,
        role: UserRole::User,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}
