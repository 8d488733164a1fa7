//! Availability
//!
//! Working windows and blocked dates for the salon's resource.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::AvailabilityServiceError;
pub use service::*;
