//! Payment models.

use crate::domain::appointments::records::AppointmentUuid;

/// Deposit checkout to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Appointment the deposit secures.
    pub appointment: AppointmentUuid,

    /// Amount in minor currency units.
    pub amount: u64,

    /// ISO 4217 currency code.
    pub currency: String,

    /// Receipt address, when known.
    pub payer_email: Option<String>,
}

/// An opened checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    /// Hosted payment page the customer is sent to.
    pub url: String,

    /// Processor reference echoed back by the payment webhook.
    pub payment_reference: String,
}
