/// Request DTOs
///
/// Create requests carry every required field; update requests make every
/// field optional. Both are validated with `validator` before they are
/// mapped into the repository's `New*` / `*Patch` shapes through
/// [`IntoRecord`].
///
/// Updates only overwrite fields that carry a value: `None` and empty
/// strings are both treated as "leave unchanged".

use crate::error::ServiceResult;

pub mod contact;
pub mod feature;
pub mod maintenance_request;
pub mod property;
pub mod property_log;
pub mod task;
pub mod task_log;
pub mod transaction;
pub mod user;
pub mod vendor;
pub mod work_type;

pub use contact::{CreateContactRequest, UpdateContactRequest};
pub use feature::{CreateFeatureRequest, UpdateFeatureRequest};
pub use maintenance_request::{CreateMaintenanceRequestRequest, UpdateMaintenanceRequestRequest};
pub use property::{CreatePropertyRequest, UpdatePropertyRequest};
pub use property_log::{CreatePropertyLogRequest, UpdatePropertyLogRequest};
pub use task::{CreateTaskRequest, UpdateTaskRequest};
pub use task_log::{CreateTaskLogRequest, UpdateTaskLogRequest};
pub use transaction::{CreateTransactionRequest, UpdateTransactionRequest};
pub use user::{CreateUserRequest, UpdateUserRequest};
pub use vendor::{CreateVendorRequest, UpdateVendorRequest};
pub use work_type::{CreateWorkTypeRequest, UpdateWorkTypeRequest};

/// Maps a validated request into a persistence record
///
/// Fallible so that mappings doing real work (password hashing) can report
/// errors through the service.
pub trait IntoRecord<T> {
    fn into_record(self) -> ServiceResult<T>;
}

/// Drops empty and whitespace-only strings
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(Some("Oak".to_string())).as_deref(), Some("Oak"));
    }
}
