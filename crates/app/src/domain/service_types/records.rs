//! Service Type Records

use jiff::Timestamp;
use salon::services::{ServiceType, ServiceTypeError, deposit_for};

use crate::uuids::TypedUuid;

/// Service Type UUID
pub type ServiceTypeUuid = TypedUuid<ServiceTypeRecord>;

/// Service Type Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTypeRecord {
    pub uuid: ServiceTypeUuid,
    pub name: String,
    pub category: String,
    pub duration_minutes: u32,
    pub price: u64,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ServiceTypeRecord {
    /// Deposit collected when booking this service.
    #[must_use]
    pub fn deposit(&self) -> u64 {
        deposit_for(self.price)
    }

    /// Engine view of the service.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored duration is zero.
    pub fn to_service_type(&self) -> Result<ServiceType, ServiceTypeError> {
        ServiceType::new(
            self.uuid.into_uuid(),
            self.duration_minutes,
            self.price,
            self.active,
        )
    }
}
