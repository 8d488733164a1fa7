//! Service Types Data

use crate::domain::service_types::records::ServiceTypeUuid;

/// New Service Type Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceType {
    pub uuid: ServiceTypeUuid,
    pub name: String,
    pub category: String,
    pub duration_minutes: u32,
    pub price: u64,
}
