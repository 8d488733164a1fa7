//! Bookings
//!
//! Creating reservations under the resource lock, then opening the deposit
//! checkout and announcing the booking.

pub mod data;
pub mod errors;
pub mod service;

pub use errors::BookingsServiceError;
pub use service::*;
