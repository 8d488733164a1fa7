//! Notifier errors.

use thiserror::Error;

/// Errors that can occur when talking to the notification service.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-2xx response or unexpected body.
    #[error("unexpected response from notification service: {0}")]
    UnexpectedResponse(String),
}
