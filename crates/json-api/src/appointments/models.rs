//! Appointment Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salon_app::domain::{appointments::records::AppointmentRecord, bookings::data::CheckoutOutcome};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppointmentResponse {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,
    pub service_type_uuid: Uuid,

    /// When the appointment starts
    pub start_at: String,

    /// When the appointment ends
    pub end_at: String,

    /// One of `booked`, `paid`, `completed`, `canceled`
    pub status: String,

    /// Processor reference of the latest checkout
    pub payment_reference: Option<String>,

    /// Deposit received, in minor currency units
    pub amount_paid: u64,

    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AppointmentRecord> for AppointmentResponse {
    fn from(record: AppointmentRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            customer_uuid: record.customer_uuid.into(),
            service_type_uuid: record.service_type_uuid.into(),
            start_at: record.start_at.to_string(),
            end_at: record.end_at.to_string(),
            status: record.status.to_string(),
            payment_reference: record.payment_reference,
            amount_paid: record.amount_paid,
            notes: record.notes,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Where the customer pays the deposit, or why they cannot yet.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// Processor checkout page
    pub checkout_url: Option<String>,

    /// Why no checkout could be opened; the reservation still stands
    pub payment_error: Option<String>,
}

impl From<CheckoutOutcome> for CheckoutResponse {
    fn from(outcome: CheckoutOutcome) -> Self {
        match outcome {
            CheckoutOutcome::Ready { url } => Self {
                checkout_url: Some(url),
                payment_error: None,
            },
            CheckoutOutcome::Failed { reason } => Self {
                checkout_url: None,
                payment_error: Some(reason),
            },
        }
    }
}
