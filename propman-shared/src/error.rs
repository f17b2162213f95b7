/// Error types shared across the data layer
///
/// Errors are layered the same way the calls are:
///
/// ```text
/// ServiceError
///   ├── Validation   (validator, DTO checks)
///   ├── Repository   (RepositoryError, forwarded unchanged)
///   ├── Storage      (StorageError from the object store)
///   ├── Password     (PasswordError from argon2)
///   └── Io           (scratch file handling)
/// ```
///
/// Repositories wrap every sqlx failure with the entity and the operation
/// that failed, so a caller can log the error without extra context.

use crate::auth::password::PasswordError;
use crate::storage::StorageError;

/// Repository result type alias
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors raised by repository implementations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No live (non soft-deleted) row matched the id
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A unique constraint rejected the write
    #[error("{entity} conflicts with an existing record ({constraint})")]
    Conflict {
        entity: &'static str,
        constraint: String,
    },

    /// The requested ordering could not be parsed or names an unknown column
    #[error("Invalid order clause: {0}")]
    InvalidOrder(String),

    /// Any other database failure
    #[error("Failed to {op} {entity}: {source}")]
    Database {
        entity: &'static str,
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl RepositoryError {
    /// Wraps a sqlx error with the entity and operation that produced it
    ///
    /// `RowNotFound` is not handled here: callers that fetch by id know the id
    /// and build `NotFound` themselves. Unique violations become `Conflict`.
    pub fn database(entity: &'static str, op: &'static str, source: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &source {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return RepositoryError::Conflict { entity, constraint };
            }
        }

        RepositoryError::Database { entity, op, source }
    }

    /// Returns a closure suitable for `map_err`
    pub fn wrap(entity: &'static str, op: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::database(entity, op, source)
    }

    /// True when the error signals a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    /// True when the error signals a unique constraint violation
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::Conflict { .. })
    }
}

/// Errors raised by the service layer
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input DTO failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Repository failure, forwarded as-is
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Object storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Password hashing failure
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Local file handling failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Email/password pair did not match a user
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Input was rejected before reaching the repository
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// True when the underlying repository reported a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Repository(err) if err.is_not_found())
    }

    /// True when the underlying repository reported a unique violation
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Repository(err) if err.is_conflict())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RepositoryError::NotFound {
            entity: "property",
            id: 42,
        };
        assert_eq!(err.to_string(), "property 42 not found");
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_database_wraps_context() {
        let err = RepositoryError::database("user", "insert", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Database { entity: "user", op: "insert", .. }));
        assert!(err.to_string().starts_with("Failed to insert user"));
    }

    #[test]
    fn test_service_error_forwards_not_found() {
        let err: ServiceError = RepositoryError::NotFound {
            entity: "vendor",
            id: 7,
        }
        .into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "vendor 7 not found");
    }
}
