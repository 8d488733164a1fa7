//! Appointments
//!
//! Reservations of the salon's resource and their status lifecycle.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::AppointmentsServiceError;
pub use service::*;
