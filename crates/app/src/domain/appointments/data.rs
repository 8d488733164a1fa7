//! Appointment Data

use jiff::Timestamp;

use crate::{
    domain::{appointments::records::AppointmentUuid, service_types::records::ServiceTypeUuid},
    identity::CustomerUuid,
    settings::ResourceUuid,
};

/// New Appointment Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub uuid: AppointmentUuid,
    pub resource_uuid: ResourceUuid,
    pub customer_uuid: CustomerUuid,
    pub service_type_uuid: ServiceTypeUuid,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub notes: Option<String>,
}

/// Settlement reported by the payment processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub payment_reference: String,

    /// Amount settled, in minor currency units.
    pub amount_paid: u64,
}
