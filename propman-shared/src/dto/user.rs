/// User requests
///
/// Passwords arrive in plaintext and are hashed with Argon2id during
/// mapping; plaintext never reaches the repository.

use super::{non_empty, IntoRecord};
use crate::auth::password;
use crate::error::{ServiceError, ServiceResult};
use crate::models::user::{NewUser, UserPatch, UserRole};
use serde::Deserialize;
use validator::Validate;

pub const MIN_PASSWORD_LENGTH: usize = 8;
const MIN_PASSWORD_LENGTH_U64: u64 = MIN_PASSWORD_LENGTH as u64;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH_U64, message = "Password is shorter than the minimum length"))]
    pub password: String,

    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    /// Defaults to `user`
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl IntoRecord<NewUser> for CreateUserRequest {
    fn into_record(self) -> ServiceResult<NewUser> {
        Ok(NewUser {
            email: self.email.trim().to_string(),
            password_hash: password::hash_password(&self.password)?,
            first_name: non_empty(self.first_name),
            last_name: non_empty(self.last_name),
            phone: non_empty(self.phone),
            role: self.role.unwrap_or_default(),
        })
    }
}

/// Update request; an empty or absent password keeps the stored hash
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub password: Option<String>,

    #[validate(length(max = 100))]
    pub first_name: Option<String>,

    #[validate(length(max = 100))]
    pub last_name: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    pub role: Option<UserRole>,
}

impl IntoRecord<UserPatch> for UpdateUserRequest {
    fn into_record(self) -> ServiceResult<UserPatch> {
        let password_hash = match self.password.filter(|p| !p.is_empty()) {
            Some(p) if p.chars().count() < MIN_PASSWORD_LENGTH => {
                return Err(ServiceError::InvalidInput(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                )))
            }
            Some(p) => Some(password::hash_password(&p)?),
            None => None,
        };

        Ok(UserPatch {
            email: non_empty(self.email).map(|e| e.trim().to_string()),
            password_hash,
            first_name: non_empty(self.first_name),
            last_name: non_empty(self.last_name),
            phone: non_empty(self.phone),
            role: self.role,
        })
    }
}
