//! Service types service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::service_types::{
        data::NewServiceType,
        errors::ServiceTypesServiceError,
        records::{ServiceTypeRecord, ServiceTypeUuid},
        repository::PgServiceTypesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgServiceTypesService {
    db: Db,
    repository: PgServiceTypesRepository,
}

impl PgServiceTypesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgServiceTypesRepository::new(),
        }
    }
}

#[async_trait]
impl ServiceTypesService for PgServiceTypesService {
    async fn list_service_types(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<ServiceTypeRecord>, ServiceTypesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let service_types = self
            .repository
            .list_service_types(&mut tx, include_inactive)
            .await?;

        tx.commit().await?;

        Ok(service_types)
    }

    async fn get_service_type(
        &self,
        service_type: ServiceTypeUuid,
    ) -> Result<ServiceTypeRecord, ServiceTypesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let service_type = self
            .repository
            .get_service_type(&mut tx, service_type)
            .await?;

        tx.commit().await?;

        Ok(service_type)
    }

    async fn create_service_type(
        &self,
        service_type: NewServiceType,
    ) -> Result<ServiceTypeRecord, ServiceTypesServiceError> {
        if service_type.duration_minutes == 0 || service_type.name.trim().is_empty() {
            return Err(ServiceTypesServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_service_type(&mut tx, &service_type)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn deactivate_service_type(
        &self,
        service_type: ServiceTypeUuid,
    ) -> Result<ServiceTypeRecord, ServiceTypesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .deactivate_service_type(&mut tx, service_type)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ServiceTypesService: Send + Sync {
    /// Retrieves service types, active ones only unless `include_inactive`.
    async fn list_service_types(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<ServiceTypeRecord>, ServiceTypesServiceError>;

    /// Retrieve a single service type.
    async fn get_service_type(
        &self,
        service_type: ServiceTypeUuid,
    ) -> Result<ServiceTypeRecord, ServiceTypesServiceError>;

    /// Creates a new, active service type.
    async fn create_service_type(
        &self,
        service_type: NewServiceType,
    ) -> Result<ServiceTypeRecord, ServiceTypesServiceError>;

    /// Withdraws a service type from booking; existing appointments keep it.
    async fn deactivate_service_type(
        &self,
        service_type: ServiceTypeUuid,
    ) -> Result<ServiceTypeRecord, ServiceTypesServiceError>;
}
