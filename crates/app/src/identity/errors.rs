//! Identity errors.

use thiserror::Error;

/// Errors that can occur when resolving a bearer token.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The token is unknown, expired or revoked.
    #[error("bearer token was not accepted")]
    Unauthenticated,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response or unexpected body.
    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}
