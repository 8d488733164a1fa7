//! Payments
//!
//! Checkout sessions are created by an external payment processor; settlement
//! arrives later through the payment webhook.

mod client;
mod errors;
mod models;

use async_trait::async_trait;
use mockall::automock;

pub use client::{HttpPaymentGateway, HttpPaymentsConfig};
pub use errors::PaymentError;
pub use models::{Checkout, CheckoutRequest};

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a checkout session for a deposit.
    async fn create_checkout(&self, request: CheckoutRequest) -> Result<Checkout, PaymentError>;
}
