/// Integration tests for the property repository
///
/// Covers listing, ordering, eager loading and the append/replace rule
/// for association updates. Skipped unless DATABASE_URL is set.

mod common;

use propman_shared::models::contact::NewContact;
use propman_shared::models::feature::NewFeature;
use propman_shared::models::property::{NewProperty, PropertyPatch};
use propman_shared::models::property_log::NewPropertyLog;
use propman_shared::repository::{
    ListParams, PgContactRepository, PgFeatureRepository, PgPropertyLogRepository,
    PgPropertyRepository, PropertyLogRepository, Repository,
};
use sqlx::PgPool;

fn property(name: &str) -> NewProperty {
    NewProperty {
        name: name.to_string(),
        city: Some("Tacoma".to_string()),
        bedrooms: Some(3),
        price: Some(425_000.0),
        ..Default::default()
    }
}

async fn features(pool: &PgPool, names: &[&str]) -> Vec<i64> {
    let repo = PgFeatureRepository::new(pool.clone());
    let mut ids = Vec::new();
    for name in names {
        let feature = repo
            .create(NewFeature {
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap();
        ids.push(feature.id);
    }
    ids
}

fn feature_ids(property: &propman_shared::models::property::Property) -> Vec<i64> {
    property.features.iter().map(|f| f.id).collect()
}

#[tokio::test]
async fn test_find_all_returns_page_newest_first() {
    let db = test_db!();
    let repo = PgPropertyRepository::new(db.pool.clone());

    let first = repo.create(property("Maple Court")).await.unwrap();
    let second = repo.create(property("Birch House")).await.unwrap();

    let page = repo.find_all(&ListParams::new(10, 0)).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, second.id, "default order is newest first");
    assert_eq!(page[1].id, first.id);

    let unbounded = repo.find_all(&ListParams::default()).await.unwrap();
    assert_eq!(unbounded.len(), 2);

    let skipped = repo.find_all(&ListParams::new(0, 1)).await.unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].id, first.id);

    let by_name = repo
        .find_all(&ListParams::new(10, 0).ordered_by("name asc"))
        .await
        .unwrap();
    assert_eq!(by_name[0].name, "Birch House");

    db.cleanup().await;
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let db = test_db!();
    let repo = PgPropertyRepository::new(db.pool.clone());

    repo.create(property("Maple Court")).await.unwrap();
    let err = repo.create(property("Maple Court")).await.unwrap_err();
    assert!(err.is_conflict());

    db.cleanup().await;
}

#[tokio::test]
async fn test_create_links_features_and_contacts() {
    let db = test_db!();
    let repo = PgPropertyRepository::new(db.pool.clone());
    let ids = features(&db.pool, &["Pool", "Garage"]).await;

    let contact = PgContactRepository::new(db.pool.clone())
        .create(NewContact {
            first_name: "Sam".to_string(),
            last_name: Some("Lee".to_string()),
            email: Some("sam@example.com".to_string()),
            phone: None,
            company: None,
            contact_type: Some("owner".to_string()),
            notes: None,
        })
        .await
        .unwrap();

    let created = repo
        .create(NewProperty {
            feature_ids: ids.clone(),
            contact_ids: vec![contact.id],
            ..property("Maple Court")
        })
        .await
        .unwrap();

    assert_eq!(feature_ids(&created), ids);
    assert_eq!(created.contacts.len(), 1);
    assert_eq!(created.contacts[0].first_name, "Sam");
    assert!(created.logs.is_empty());

    db.cleanup().await;
}

#[tokio::test]
async fn test_feature_update_appends_then_replaces() {
    let db = test_db!();
    let repo = PgPropertyRepository::new(db.pool.clone());
    let ids = features(&db.pool, &["Pool", "Garage", "Fireplace"]).await;

    let created = repo.create(property("Maple Court")).await.unwrap();
    assert!(created.features.is_empty());

    // No existing links: appended
    let appended = repo
        .update(
            created.id,
            PropertyPatch {
                feature_ids: Some(vec![ids[0], ids[1]]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(feature_ids(&appended), vec![ids[0], ids[1]]);

    // Existing links: replaced entirely
    let replaced = repo
        .update(
            created.id,
            PropertyPatch {
                feature_ids: Some(vec![ids[2]]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(feature_ids(&replaced), vec![ids[2]]);

    // No list supplied: links untouched
    let renamed = repo
        .update(
            created.id,
            PropertyPatch {
                name: Some("Maple Court East".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Maple Court East");
    assert_eq!(feature_ids(&renamed), vec![ids[2]]);
    assert_eq!(renamed.city.as_deref(), Some("Tacoma"));

    db.cleanup().await;
}

#[tokio::test]
async fn test_find_by_id_loads_logs() {
    let db = test_db!();
    let repo = PgPropertyRepository::new(db.pool.clone());
    let logs = PgPropertyLogRepository::new(db.pool.clone());

    let created = repo.create(property("Maple Court")).await.unwrap();
    for message in ["Listed", "Inspected"] {
        logs.create(NewPropertyLog {
            property_id: created.id,
            user_id: None,
            message: message.to_string(),
        })
        .await
        .unwrap();
    }

    let loaded = repo.find_by_id(created.id).await.unwrap();
    let messages: Vec<&str> = loaded.logs.iter().map(|l| l.message.as_str()).collect();
    assert_eq!(messages, ["Inspected", "Listed"]);

    let listed = logs
        .find_by_property(created.id, &ListParams::new(1, 0))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].message, "Inspected");

    db.cleanup().await;
}

#[tokio::test]
async fn test_deleted_property_is_hidden() {
    let db = test_db!();
    let repo = PgPropertyRepository::new(db.pool.clone());

    let created = repo.create(property("Maple Court")).await.unwrap();
    repo.delete(created.id).await.unwrap();

    assert!(repo.find_by_id(created.id).await.unwrap_err().is_not_found());
    assert!(repo
        .update(created.id, PropertyPatch::default())
        .await
        .unwrap_err()
        .is_not_found());
    assert!(repo.find_all(&ListParams::default()).await.unwrap().is_empty());
    assert_eq!(repo.count().await.unwrap(), 0);

    db.cleanup().await;
}

#[tokio::test]
async fn test_deleted_feature_is_not_loaded() {
    let db = test_db!();
    let repo = PgPropertyRepository::new(db.pool.clone());
    let ids = features(&db.pool, &["Pool", "Garage"]).await;

    let created = repo
        .create(NewProperty {
            feature_ids: ids.clone(),
            ..property("Maple Court")
        })
        .await
        .unwrap();

    PgFeatureRepository::new(db.pool.clone()).delete(ids[0]).await.unwrap();

    let loaded = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(feature_ids(&loaded), vec![ids[1]]);

    db.cleanup().await;
}
