//! Reminders
//!
//! Scheduling of pre-appointment reminders and their delivery when the
//! delayed task fires.

pub mod errors;
pub mod scheduler;
pub mod service;

pub use errors::RemindersServiceError;
pub use scheduler::ReminderScheduler;
pub use service::*;
