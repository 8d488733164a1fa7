//! Reminder Timing

use jiff::{SignedDuration, Timestamp};

/// Default gap between a reminder and the appointment it announces.
pub const DEFAULT_REMINDER_LEAD: SignedDuration = SignedDuration::from_mins(15);

/// When to remind a customer of an upcoming appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    lead: SignedDuration,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            lead: DEFAULT_REMINDER_LEAD,
        }
    }
}

impl ReminderPolicy {
    /// Create a policy with a custom lead time. Negative leads are treated as zero.
    pub fn new(lead: SignedDuration) -> Self {
        Self {
            lead: lead.max(SignedDuration::ZERO),
        }
    }

    /// Lead time before the appointment.
    pub fn lead(&self) -> SignedDuration {
        self.lead
    }

    /// Delivery instant for an appointment starting at `start`, never earlier than `now`.
    pub fn deliver_at(&self, start: Timestamp, now: Timestamp) -> Timestamp {
        start
            .checked_sub(self.lead)
            .map_or(now, |target| target.max(now))
    }
}
