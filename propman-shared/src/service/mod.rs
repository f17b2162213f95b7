/// Services: DTO mapping in front of the repositories
///
/// A service validates the incoming request, maps it into the repository's
/// insert or patch shape and forwards the call. Repository errors are
/// returned unchanged (wrapped in `ServiceError::Repository`).
///
/// Every entity uses the generic [`CrudService`]; the aliases below pin the
/// request types and default to the PostgreSQL repository:
///
/// ```no_run
/// use propman_shared::dto::CreateFeatureRequest;
/// use propman_shared::repository::PgFeatureRepository;
/// use propman_shared::service::{FeatureService, Service};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let features: FeatureService = FeatureService::new(PgFeatureRepository::new(pool));
/// let pool_feature = features
///     .create(CreateFeatureRequest { name: "Pool".into(), description: None })
///     .await?;
/// println!("created feature {}", pool_feature.id);
/// # Ok(())
/// # }
/// ```
///
/// Property attachments have their own service in [`attachment`], since the
/// workflow also involves object storage.

use crate::auth::password;
use crate::dto::{
    CreateContactRequest, CreateFeatureRequest, CreateMaintenanceRequestRequest,
    CreatePropertyLogRequest, CreatePropertyRequest, CreateTaskLogRequest, CreateTaskRequest,
    CreateTransactionRequest, CreateUserRequest, CreateVendorRequest, CreateWorkTypeRequest,
    IntoRecord, UpdateContactRequest, UpdateFeatureRequest, UpdateMaintenanceRequestRequest,
    UpdatePropertyLogRequest, UpdatePropertyRequest, UpdateTaskLogRequest, UpdateTaskRequest,
    UpdateTransactionRequest, UpdateUserRequest, UpdateVendorRequest, UpdateWorkTypeRequest,
};
use crate::error::{ServiceError, ServiceResult};
use crate::models::property_log::PropertyLog;
use crate::models::task_log::TaskLog;
use crate::models::user::User;
use crate::repository::{
    ListParams, PgContactRepository, PgFeatureRepository, PgMaintenanceRequestRepository,
    PgPropertyLogRepository, PgPropertyRepository, PgTaskLogRepository, PgTaskRepository,
    PgTransactionRepository, PgUserRepository, PgVendorRepository, PgWorkTypeRepository,
    PropertyLogRepository, Repository, TaskLogRepository, UserRepository,
};
use async_trait::async_trait;
use std::marker::PhantomData;
use tracing::{debug, warn};
use validator::Validate;

pub mod attachment;

#[cfg(test)]
pub(crate) mod testing;

pub use attachment::{PropertyAttachmentService, UploadedFile};

/// CRUD operations over request DTOs
#[async_trait]
pub trait Service: Send + Sync {
    type Entity: Send;
    type CreateDto: Send;
    type UpdateDto: Send;

    async fn find_all(&self, params: &ListParams) -> ServiceResult<Vec<Self::Entity>>;

    async fn find_by_id(&self, id: i64) -> ServiceResult<Self::Entity>;

    /// Validates and maps the request, then inserts
    async fn create(&self, dto: Self::CreateDto) -> ServiceResult<Self::Entity>;

    /// Validates and maps the request, then applies it as a patch
    async fn update(&self, id: i64, dto: Self::UpdateDto) -> ServiceResult<Self::Entity>;

    async fn delete(&self, id: i64) -> ServiceResult<()>;
}

/// Generic service over a repository and its request DTOs
#[derive(Debug, Clone)]
pub struct CrudService<R, C, U> {
    repository: R,
    _dto: PhantomData<fn(C, U)>,
}

impl<R, C, U> CrudService<R, C, U> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _dto: PhantomData,
        }
    }

    /// Underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R, C, U> Service for CrudService<R, C, U>
where
    R: Repository,
    C: Validate + IntoRecord<R::Create> + Send + 'static,
    U: Validate + IntoRecord<R::Patch> + Send + 'static,
{
    type Entity = R::Entity;
    type CreateDto = C;
    type UpdateDto = U;

    async fn find_all(&self, params: &ListParams) -> ServiceResult<Vec<R::Entity>> {
        Ok(self.repository.find_all(params).await?)
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<R::Entity> {
        Ok(self.repository.find_by_id(id).await?)
    }

    async fn create(&self, dto: C) -> ServiceResult<R::Entity> {
        dto.validate()?;
        let record = dto.into_record()?;
        Ok(self.repository.create(record).await?)
    }

    async fn update(&self, id: i64, dto: U) -> ServiceResult<R::Entity> {
        dto.validate()?;
        let patch = dto.into_record()?;
        Ok(self.repository.update(id, patch).await?)
    }

    async fn delete(&self, id: i64) -> ServiceResult<()> {
        Ok(self.repository.delete(id).await?)
    }
}

pub type UserService<R = PgUserRepository> = CrudService<R, CreateUserRequest, UpdateUserRequest>;
pub type PropertyService<R = PgPropertyRepository> =
    CrudService<R, CreatePropertyRequest, UpdatePropertyRequest>;
pub type FeatureService<R = PgFeatureRepository> =
    CrudService<R, CreateFeatureRequest, UpdateFeatureRequest>;
pub type ContactService<R = PgContactRepository> =
    CrudService<R, CreateContactRequest, UpdateContactRequest>;
pub type TaskService<R = PgTaskRepository> = CrudService<R, CreateTaskRequest, UpdateTaskRequest>;
pub type TaskLogService<R = PgTaskLogRepository> =
    CrudService<R, CreateTaskLogRequest, UpdateTaskLogRequest>;
pub type MaintenanceRequestService<R = PgMaintenanceRequestRepository> =
    CrudService<R, CreateMaintenanceRequestRequest, UpdateMaintenanceRequestRequest>;
pub type TransactionService<R = PgTransactionRepository> =
    CrudService<R, CreateTransactionRequest, UpdateTransactionRequest>;
pub type VendorService<R = PgVendorRepository> =
    CrudService<R, CreateVendorRequest, UpdateVendorRequest>;
pub type WorkTypeService<R = PgWorkTypeRepository> =
    CrudService<R, CreateWorkTypeRequest, UpdateWorkTypeRequest>;
pub type PropertyLogService<R = PgPropertyLogRepository> =
    CrudService<R, CreatePropertyLogRequest, UpdatePropertyLogRequest>;

impl<R: UserRepository> CrudService<R, CreateUserRequest, UpdateUserRequest> {
    /// Checks an email/password pair against the stored hash
    ///
    /// Unknown emails and wrong passwords both yield
    /// `ServiceError::InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<User> {
        let user = self
            .repository
            .find_by_email(email.trim())
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash)? {
            warn!(user_id = user.id, "Password verification failed");
            return Err(ServiceError::InvalidCredentials);
        }

        debug!(user_id = user.id, "User authenticated");
        Ok(user)
    }
}

impl<R: PropertyLogRepository> CrudService<R, CreatePropertyLogRequest, UpdatePropertyLogRequest> {
    pub async fn find_by_property(&self, property_id: i64, params: &ListParams) -> ServiceResult<Vec<PropertyLog>> {
        Ok(self.repository.find_by_property(property_id, params).await?)
    }
}

impl<R: TaskLogRepository> CrudService<R, CreateTaskLogRequest, UpdateTaskLogRequest> {
    pub async fn find_by_task(&self, task_id: i64, params: &ListParams) -> ServiceResult<Vec<TaskLog>> {
        Ok(self.repository.find_by_task(task_id, params).await?)
    }
}
