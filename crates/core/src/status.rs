//! Appointment Status
//!
//! The reservation lifecycle. Every status write goes through [`transition`],
//! which decides whether the move is legal for the acting party and which side
//! effects the caller must perform once the write has committed.
//!
//! ```text
//! booked ──► paid ──► completed
//!    │         │
//!    └────┬────┘
//!         ▼
//!     canceled ──(administrator reactivation)──► booked | paid
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Reservation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    /// Slot reserved, deposit not yet received.
    Booked,

    /// Deposit received.
    Paid,

    /// Service delivered.
    Completed,

    /// Reservation withdrawn; the slot is free again.
    Canceled,
}

impl AppointmentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Booked, Self::Paid, Self::Completed, Self::Canceled];

    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Paid => "paid",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Whether a reservation in this status occupies its time range.
    pub const fn holds_slot(self) -> bool {
        !matches!(self, Self::Canceled)
    }

    /// Whether no further transitions leave this status in the primary flow.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown appointment status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Party requesting a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The customer who owns the reservation.
    Customer,

    /// A salon administrator.
    Administrator,

    /// The external payment processor confirming a payment.
    PaymentProcessor,

    /// A time-based job.
    Scheduler,
}

/// Rejected status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The move is never legal.
    #[error("cannot move appointment from {from} to {to}")]
    Illegal {
        /// Current status.
        from: AppointmentStatus,

        /// Requested status.
        to: AppointmentStatus,
    },

    /// The move exists but not for this actor.
    #[error("{actor:?} may not move appointment from {from} to {to}")]
    NotPermitted {
        /// Acting party.
        actor: Actor,

        /// Current status.
        from: AppointmentStatus,

        /// Requested status.
        to: AppointmentStatus,
    },
}

/// Work the caller owes after a transition commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    /// The reservation re-enters the calendar and must be checked for overlap
    /// before the write.
    pub recheck_overlap: bool,

    /// A pre-appointment reminder must be scheduled.
    pub schedule_reminder: bool,

    /// A payment-received notification must be dispatched.
    pub notify_payment_received: bool,
}

/// Validate a status change and return the side effects it triggers.
///
/// # Errors
///
/// Returns [`TransitionError::Illegal`] for moves that are never allowed
/// (including same-status moves) and [`TransitionError::NotPermitted`] when
/// the move exists but `actor` may not perform it.
pub fn transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
    actor: Actor,
) -> Result<Effects, TransitionError> {
    use AppointmentStatus::{Booked, Canceled, Completed, Paid};

    let allowed: &[Actor] = match (from, to) {
        (Booked, Paid) => &[Actor::PaymentProcessor, Actor::Administrator],
        (Booked | Paid, Canceled) => &[Actor::Customer, Actor::Administrator],
        (Booked | Paid, Completed) => &[Actor::Administrator, Actor::Scheduler],
        (Canceled, Booked | Paid) => &[Actor::Administrator],
        _ => return Err(TransitionError::Illegal { from, to }),
    };

    if !allowed.contains(&actor) {
        return Err(TransitionError::NotPermitted { actor, from, to });
    }

    Ok(Effects {
        recheck_overlap: !from.holds_slot() && to.holds_slot(),
        schedule_reminder: to == Paid,
        notify_payment_received: from == Booked && to == Paid,
    })
}
