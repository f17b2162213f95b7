/// Integration tests for tasks, vendors, transactions and maintenance requests
///
/// Skipped unless DATABASE_URL is set.

mod common;

use chrono::Utc;
use propman_shared::dto::{CreateMaintenanceRequestRequest, CreateTaskRequest, UpdateMaintenanceRequestRequest};
use propman_shared::models::contact::NewContact;
use propman_shared::models::property::NewProperty;
use propman_shared::models::task::TaskPatch;
use propman_shared::models::task_log::NewTaskLog;
use propman_shared::models::transaction::{NewTransaction, TransactionPatch};
use propman_shared::models::user::{NewUser, UserRole};
use propman_shared::models::vendor::{NewVendor, VendorPatch};
use propman_shared::models::work_type::NewWorkType;
use propman_shared::repository::{
    ListParams, PgContactRepository, PgMaintenanceRequestRepository, PgPropertyRepository,
    PgTaskLogRepository, PgTaskRepository, PgTransactionRepository, PgUserRepository,
    PgVendorRepository, PgWorkTypeRepository, Repository, TaskLogRepository,
};
use propman_shared::service::{MaintenanceRequestService, Service, TaskService};
use sqlx::PgPool;

async fn user(pool: &PgPool, email: &str) -> i64 {
    PgUserRepository::new(pool.clone())
        .create(NewUser {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=65536,t=3,p=4$c2FsdA$aGFzaA".to_string(),
            first_name: None,
            last_name: None,
            phone: None,
            role: UserRole::User,
        })
        .await
        .unwrap()
        .id
}

async fn contact(pool: &PgPool, first_name: &str) -> i64 {
    PgContactRepository::new(pool.clone())
        .create(NewContact {
            first_name: first_name.to_string(),
            last_name: None,
            email: None,
            phone: None,
            company: None,
            contact_type: None,
            notes: None,
        })
        .await
        .unwrap()
        .id
}

async fn property(pool: &PgPool, name: &str) -> i64 {
    PgPropertyRepository::new(pool.clone())
        .create(NewProperty {
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_task_assignees_and_logs() {
    let db = test_db!();
    let tasks: TaskService = TaskService::new(PgTaskRepository::new(db.pool.clone()));
    let alice = user(&db.pool, "alice@example.com").await;
    let bob = user(&db.pool, "bob@example.com").await;
    let property_id = property(&db.pool, "Maple Court").await;

    let task = tasks
        .create(CreateTaskRequest {
            title: "Replace water heater".to_string(),
            property_id: Some(property_id),
            assignee_ids: vec![alice],
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(task.status, "open");
    assert_eq!(task.assignees.len(), 1);
    assert_eq!(task.assignees[0].email, "alice@example.com");

    let logs = PgTaskLogRepository::new(db.pool.clone());
    logs.create(NewTaskLog {
        task_id: task.id,
        user_id: Some(alice),
        message: "Ordered part".to_string(),
    })
    .await
    .unwrap();

    let reassigned = tasks
        .repository()
        .update(
            task.id,
            TaskPatch {
                status: Some("in_progress".to_string()),
                assignee_ids: Some(vec![bob]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(reassigned.status, "in_progress");
    let assignees: Vec<i64> = reassigned.assignees.iter().map(|u| u.id).collect();
    assert_eq!(assignees, vec![bob]);
    assert_eq!(reassigned.logs.len(), 1);
    assert_eq!(reassigned.property_id, Some(property_id));

    let history = logs.find_by_task(task.id, &ListParams::default()).await.unwrap();
    assert_eq!(history[0].message, "Ordered part");

    db.cleanup().await;
}

#[tokio::test]
async fn test_vendor_work_types() {
    let db = test_db!();
    let work_types = PgWorkTypeRepository::new(db.pool.clone());
    let vendors = PgVendorRepository::new(db.pool.clone());

    let mut ids = Vec::new();
    for name in ["Plumbing", "Electrical"] {
        ids.push(
            work_types
                .create(NewWorkType {
                    name: name.to_string(),
                    description: None,
                })
                .await
                .unwrap()
                .id,
        );
    }

    let vendor = vendors
        .create(NewVendor {
            name: "Northside Repairs".to_string(),
            email: Some("jobs@northside.example".to_string()),
            phone: None,
            address: None,
            notes: None,
            work_type_ids: vec![ids[0]],
        })
        .await
        .unwrap();
    assert_eq!(vendor.work_types.len(), 1);
    assert_eq!(vendor.work_types[0].name, "Plumbing");

    let updated = vendors
        .update(
            vendor.id,
            VendorPatch {
                work_type_ids: Some(vec![ids[1]]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let names: Vec<&str> = updated.work_types.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["Electrical"]);
    assert_eq!(updated.email.as_deref(), Some("jobs@northside.example"));

    db.cleanup().await;
}

#[tokio::test]
async fn test_transaction_contacts() {
    let db = test_db!();
    let transactions = PgTransactionRepository::new(db.pool.clone());
    let tenant = contact(&db.pool, "Jordan").await;
    let agent = contact(&db.pool, "Casey").await;
    let property_id = property(&db.pool, "Maple Court").await;

    let transaction = transactions
        .create(NewTransaction {
            property_id: Some(property_id),
            transaction_type: "rent".to_string(),
            amount: 1850.0,
            occurred_at: Utc::now(),
            description: None,
            contact_ids: vec![],
        })
        .await
        .unwrap();
    assert!(transaction.contacts.is_empty());

    let linked = transactions
        .update(
            transaction.id,
            TransactionPatch {
                contact_ids: Some(vec![tenant, agent]),
                amount: Some(1900.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(linked.amount, 1900.0);
    let mut contact_ids: Vec<i64> = linked.contacts.iter().map(|c| c.id).collect();
    contact_ids.sort();
    assert_eq!(contact_ids, vec![tenant, agent]);

    transactions.delete(transaction.id).await.unwrap();
    assert!(transactions.find_by_id(transaction.id).await.unwrap_err().is_not_found());

    db.cleanup().await;
}

#[tokio::test]
async fn test_maintenance_request_lifecycle() {
    let db = test_db!();
    let requests: MaintenanceRequestService =
        MaintenanceRequestService::new(PgMaintenanceRequestRepository::new(db.pool.clone()));
    let property_id = property(&db.pool, "Maple Court").await;

    let request = requests
        .create(CreateMaintenanceRequestRequest {
            property_id,
            vendor_id: None,
            work_type_id: None,
            title: "Leaking faucet".to_string(),
            description: Some("Kitchen sink".to_string()),
            status: None,
            priority: Some("low".to_string()),
            scheduled_for: None,
            cost: None,
        })
        .await
        .unwrap();
    assert_eq!(request.status, "open");

    let completed_at = Utc::now();
    let done = requests
        .update(
            request.id,
            UpdateMaintenanceRequestRequest {
                status: Some("done".to_string()),
                completed_at: Some(completed_at),
                cost: Some(120.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(done.status, "done");
    assert_eq!(done.cost, Some(120.5));
    assert!(done.completed_at.is_some());
    assert_eq!(done.description.as_deref(), Some("Kitchen sink"));

    let all = requests.find_all(&ListParams::default()).await.unwrap();
    assert_eq!(all.len(), 1);

    db.cleanup().await;
}
