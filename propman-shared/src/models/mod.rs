/// Database models
///
/// One module per entity. Each module defines:
///
/// - the persisted row (`sqlx::FromRow`), with eager-loaded relations marked
///   `#[sqlx(skip)]` and filled in by the repository
/// - `New*`: the shape written on insert
/// - `*Patch`: optional fields for fetch-then-patch updates; `apply` copies
///   every `Some` field onto a loaded row
///
/// # Models
///
/// - `user`: User accounts with Argon2id password hashes and a role
/// - `property`: Properties, linked to features and contacts
/// - `feature`: Property amenities
/// - `contact`: People attached to properties and transactions
/// - `task`: Work items, assigned to users
/// - `task_log`: History entries for a task
/// - `maintenance_request`: Repair requests against a property
/// - `transaction`: Money movements, linked to contacts
/// - `vendor`: Service providers, linked to work types
/// - `work_type`: Trades a vendor can perform
/// - `property_attachment`: Files kept in object storage
/// - `property_log`: History entries for a property

pub mod contact;
pub mod feature;
pub mod maintenance_request;
pub mod property;
pub mod property_attachment;
pub mod property_log;
pub mod task;
pub mod task_log;
pub mod transaction;
pub mod user;
pub mod vendor;
pub mod work_type;

/// Overwrites `slot` when the patch carries a value
pub(crate) fn patch_field<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

/// Overwrites a nullable column when the patch carries a value
///
/// A `None` patch value leaves the column untouched; it never clears it.
pub(crate) fn patch_nullable<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if let Some(value) = value {
        *slot = Some(value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_field() {
        let mut name = "Old".to_string();
        patch_field(&mut name, &None);
        assert_eq!(name, "Old");

        patch_field(&mut name, &Some("New".to_string()));
        assert_eq!(name, "New");
    }

    #[test]
    fn test_patch_nullable_never_clears() {
        let mut phone = Some("555-0100".to_string());
        patch_nullable(&mut phone, &None);
        assert_eq!(phone.as_deref(), Some("555-0100"));

        let mut empty: Option<i32> = None;
        patch_nullable(&mut empty, &Some(3));
        assert_eq!(empty, Some(3));
    }
}
