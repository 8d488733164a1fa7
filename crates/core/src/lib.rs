//! Salon
//!
//! Availability and booking engine for a single-stylist salon: turns working
//! windows and existing reservations into bookable slots, and governs the
//! lifecycle of a reservation once it exists.

pub mod blocks;
pub mod intervals;
pub mod prelude;
pub mod reminders;
pub mod services;
pub mod slots;
pub mod status;
pub mod windows;
