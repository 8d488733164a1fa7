//! Slots
//!
//! Read-side view of bookable start times.

pub mod errors;
pub mod service;

pub use errors::SlotsServiceError;
pub use service::*;
