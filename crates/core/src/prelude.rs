//! Salon Prelude

pub use crate::{
    blocks::{BlockKind, BlockedDate, BlockedDateError},
    intervals::{TimeRange, TimeRangeError},
    reminders::{DEFAULT_REMINDER_LEAD, ReminderPolicy},
    services::{ServiceType, ServiceTypeError, deposit_for},
    slots::{DEFAULT_SLOT_STRIDE, Reservation, Slot, SlotError, SlotGenerator, SlotQuery},
    status::{Actor, AppointmentStatus, Effects, TransitionError, UnknownStatus, transition},
    windows::{AvailabilityWindow, AvailabilityWindowError},
};
