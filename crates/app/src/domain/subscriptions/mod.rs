//! Subscriptions
//!
//! Device addresses notifications are delivered to, and the dispatcher that
//! fans appointment events out to them.

pub mod data;
pub mod dispatcher;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use dispatcher::NotificationDispatcher;
pub use errors::SubscriptionsServiceError;
pub use service::*;
