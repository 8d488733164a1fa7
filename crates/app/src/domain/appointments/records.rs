//! Appointment Records

use jiff::Timestamp;
use salon::{
    intervals::{TimeRange, TimeRangeError},
    slots::Reservation,
    status::AppointmentStatus,
};

use crate::{
    domain::service_types::records::ServiceTypeUuid, identity::CustomerUuid,
    settings::ResourceUuid, uuids::TypedUuid,
};

/// Appointment UUID
pub type AppointmentUuid = TypedUuid<AppointmentRecord>;

/// Appointment Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRecord {
    pub uuid: AppointmentUuid,
    pub resource_uuid: ResourceUuid,
    pub customer_uuid: CustomerUuid,
    pub service_type_uuid: ServiceTypeUuid,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub status: AppointmentStatus,
    pub payment_reference: Option<String>,
    pub amount_paid: u64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AppointmentRecord {
    /// Span the appointment occupies.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored bounds are not ordered.
    pub fn range(&self) -> Result<TimeRange, TimeRangeError> {
        TimeRange::new(self.start_at, self.end_at)
    }

    /// Engine view of the appointment for slot generation.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored bounds are not ordered.
    pub fn reservation(&self) -> Result<Reservation, TimeRangeError> {
        Ok(Reservation::new(self.range()?, self.status))
    }
}
