/// Integration tests for the property attachment workflow
///
/// Uses the PostgreSQL repositories with in-memory object storage.
/// Skipped unless DATABASE_URL is set.

mod common;

use propman_shared::models::property::NewProperty;
use propman_shared::models::property_attachment::NewPropertyAttachment;
use propman_shared::repository::{PgPropertyAttachmentRepository, PgPropertyRepository, Repository};
use propman_shared::service::{PropertyAttachmentService, UploadedFile};
use propman_shared::storage::MemoryStorage;
use sha2::{Digest, Sha256};

#[tokio::test]
async fn test_attach_download_and_delete() {
    let db = test_db!();
    let scratch = tempfile::tempdir().unwrap();

    let properties = PgPropertyRepository::new(db.pool.clone());
    let property = properties
        .create(NewProperty {
            name: "Maple Court".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let service = PropertyAttachmentService::new(
        properties,
        PgPropertyAttachmentRepository::new(db.pool.clone()),
        MemoryStorage::new(scratch.path().join("downloads")),
        scratch.path().join("uploads"),
    );

    let contents = b"floor plan bytes".to_vec();
    let attachment = service
        .attach_to_property(property.id, UploadedFile::new("floor-plan.png", contents.clone()))
        .await
        .unwrap();

    assert_eq!(
        attachment.storage_key,
        format!("property/{}/attachments/floor-plan.png", property.id)
    );
    assert_eq!(attachment.content_type, "image/png");
    assert_eq!(attachment.size, contents.len() as i64);
    assert_eq!(attachment.etag, hex::encode(Sha256::digest(&contents)));

    let listed = service.list_property_attachments(property.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].etag, attachment.etag);

    let path = service.download_property_attachment(attachment.id).await.unwrap();
    assert_eq!(tokio::fs::read(&path).await.unwrap(), contents);

    service.delete_property_attachment(attachment.id).await.unwrap();
    assert!(service.list_property_attachments(property.id).await.unwrap().is_empty());
    assert!(!service.storage().contains(&attachment.storage_key).await);

    db.cleanup().await;
}

#[tokio::test]
async fn test_reupload_keeps_one_live_record() {
    let db = test_db!();
    let scratch = tempfile::tempdir().unwrap();

    let properties = PgPropertyRepository::new(db.pool.clone());
    let property = properties
        .create(NewProperty {
            name: "Maple Court".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let service = PropertyAttachmentService::new(
        properties,
        PgPropertyAttachmentRepository::new(db.pool.clone()),
        MemoryStorage::new(scratch.path()),
        scratch.path(),
    );

    let first = service
        .attach_to_property(property.id, UploadedFile::new("lease.pdf", b"v1".to_vec()))
        .await
        .unwrap();
    let second = service
        .attach_to_property(property.id, UploadedFile::new("lease.pdf", b"v2 longer".to_vec()))
        .await
        .unwrap();

    let listed = service.list_property_attachments(property.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[0].size, 9);
    assert!(service
        .download_property_attachment(first.id)
        .await
        .unwrap_err()
        .is_not_found());

    // The index rejects a second live row for the same key
    let err = PgPropertyAttachmentRepository::new(db.pool.clone())
        .create(NewPropertyAttachment {
            property_id: property.id,
            filename: "lease.pdf".to_string(),
            size: 2,
            content_type: "application/pdf".to_string(),
            storage_key: second.storage_key.clone(),
            etag: "stale".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    db.cleanup().await;
}

#[tokio::test]
async fn test_attach_to_unknown_property() {
    let db = test_db!();
    let scratch = tempfile::tempdir().unwrap();

    let service = PropertyAttachmentService::new(
        PgPropertyRepository::new(db.pool.clone()),
        PgPropertyAttachmentRepository::new(db.pool.clone()),
        MemoryStorage::new(scratch.path()),
        scratch.path(),
    );

    let err = service
        .attach_to_property(404, UploadedFile::new("lease.pdf", b"pdf".to_vec()))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    db.cleanup().await;
}
