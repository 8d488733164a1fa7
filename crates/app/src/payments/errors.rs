//! Payment errors.

use thiserror::Error;

/// Errors that can occur when talking to the payment processor.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The processor refused to open a checkout.
    #[error("checkout rejected: {0}")]
    Rejected(String),

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The processor returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment processor: {0}")]
    UnexpectedResponse(String),
}
