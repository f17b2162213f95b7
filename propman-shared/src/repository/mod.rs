/// Repositories: the persistence boundary
///
/// Every entity has a PostgreSQL repository implementing [`Repository`],
/// the CRUD contract shared by all of them:
///
/// - `find_all`: paginated, ordered list of live rows
/// - `find_by_id`: one live row (with eager-loaded relations), or `NotFound`
/// - `create`: insert plus any join rows for supplied associations
/// - `update`: fetch, apply the patch, write, sync associations, re-read
/// - `delete`: soft delete (`deleted_at = NOW()`)
///
/// Entity-specific lookups (by email, by parent) are separate traits
/// layered on top.
///
/// # Example
///
/// ```no_run
/// use propman_shared::repository::{ListParams, PgFeatureRepository, Repository};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let features = PgFeatureRepository::new(pool);
/// let page = features.find_all(&ListParams::new(20, 0).ordered_by("name asc")).await?;
/// println!("{} features", page.len());
/// # Ok(())
/// # }
/// ```

use crate::error::RepoResult;
use crate::models::{
    property_attachment::{NewPropertyAttachment, PropertyAttachment, PropertyAttachmentPatch},
    property_log::{NewPropertyLog, PropertyLog, PropertyLogPatch},
    task_log::{NewTaskLog, TaskLog, TaskLogPatch},
    user::{NewUser, User, UserPatch},
};
use async_trait::async_trait;

pub mod associations;
pub mod query;

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

pub use associations::AssociationMode;
pub use contact::PgContactRepository;
pub use feature::PgFeatureRepository;
pub use maintenance_request::PgMaintenanceRequestRepository;
pub use property::PgPropertyRepository;
pub use property_attachment::PgPropertyAttachmentRepository;
pub use property_log::PgPropertyLogRepository;
pub use query::{ListParams, OrderBy};
pub use task::PgTaskRepository;
pub use task_log::PgTaskLogRepository;
pub use transaction::PgTransactionRepository;
pub use user::PgUserRepository;
pub use vendor::PgVendorRepository;
pub use work_type::PgWorkTypeRepository;

/// CRUD contract implemented once per entity
#[async_trait]
pub trait Repository: Send + Sync {
    /// Persisted row type
    type Entity: Send;

    /// Insert shape
    type Create: Send;

    /// Patch shape for updates
    type Patch: Send;

    /// Lists live rows (default order: newest first)
    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<Self::Entity>>;

    /// Fetches one live row; `RepositoryError::NotFound` if absent
    async fn find_by_id(&self, id: i64) -> RepoResult<Self::Entity>;

    /// Inserts a row and its associations
    async fn create(&self, data: Self::Create) -> RepoResult<Self::Entity>;

    /// Fetch-then-patch update; returns the re-read row
    async fn update(&self, id: i64, patch: Self::Patch) -> RepoResult<Self::Entity>;

    /// Soft-deletes a row; `RepositoryError::NotFound` if absent
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Number of live rows
    async fn count(&self) -> RepoResult<i64>;
}

/// User lookups beyond the CRUD contract
#[async_trait]
pub trait UserRepository: Repository<Entity = User, Create = NewUser, Patch = UserPatch> {
    /// Finds a live user by exact email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
}

/// Property log lookups
#[async_trait]
pub trait PropertyLogRepository: Repository<Entity = PropertyLog, Create = NewPropertyLog, Patch = PropertyLogPatch> {
    /// Lists a property's log entries (default order: newest first)
    async fn find_by_property(&self, property_id: i64, params: &ListParams) -> RepoResult<Vec<PropertyLog>>;
}

/// Task log lookups
#[async_trait]
pub trait TaskLogRepository: Repository<Entity = TaskLog, Create = NewTaskLog, Patch = TaskLogPatch> {
    /// Lists a task's log entries (default order: newest first)
    async fn find_by_task(&self, task_id: i64, params: &ListParams) -> RepoResult<Vec<TaskLog>>;
}

/// Attachment lookups
#[async_trait]
pub trait PropertyAttachmentRepository:
    Repository<
        Entity = PropertyAttachment,
        Create = NewPropertyAttachment,
        Patch = PropertyAttachmentPatch,
    >
{
    /// Lists a property's live attachments, newest first
    async fn find_by_property(&self, property_id: i64) -> RepoResult<Vec<PropertyAttachment>>;
}
