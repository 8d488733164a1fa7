//! Identity
//!
//! Bearer tokens are verified by an external identity provider; this module
//! only resolves a token into the [`Principal`] every operation is authorized
//! against.

mod client;
mod errors;
mod models;

use async_trait::async_trait;
use mockall::automock;

pub use client::{HttpIdentityConfig, HttpIdentityService};
pub use errors::IdentityError;
pub use models::{Customer, CustomerUuid, Principal};

#[automock]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve a bearer token into the caller it identifies.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, IdentityError>;
}
