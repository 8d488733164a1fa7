//! Booking Data

use jiff::Timestamp;

use crate::{
    domain::{appointments::records::AppointmentRecord, service_types::records::ServiceTypeUuid},
    identity::CustomerUuid,
};

/// New Booking Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub service_type: ServiceTypeUuid,
    pub start_at: Timestamp,
    pub notes: Option<String>,

    /// Customer to book for. Only administrators may name someone other
    /// than themselves; `None` books for the caller.
    pub customer: Option<CustomerUuid>,
}

/// Result of opening the deposit checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The customer can pay at `url`.
    Ready { url: String },

    /// No checkout could be opened; the reservation stands unpaid.
    Failed { reason: String },
}

impl CheckoutOutcome {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Ready { url } => Some(url),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ready { .. } => None,
            Self::Failed { reason } => Some(reason),
        }
    }
}

/// A committed reservation and the state of its deposit checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub appointment: AppointmentRecord,
    pub checkout: CheckoutOutcome,
}
