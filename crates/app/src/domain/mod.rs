//! Salon Domain Concerns

pub mod appointments;
pub mod availability;
pub mod bookings;
pub mod reminders;
pub mod service_types;
pub mod slots;
pub mod subscriptions;
