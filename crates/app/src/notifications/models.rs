//! Notification models.

use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::appointments::records::{AppointmentRecord, AppointmentUuid};

/// Message template to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// A reservation was created.
    BookingCreated,

    /// A deposit was received.
    PaymentReceived,

    /// The appointment is about to start.
    AppointmentReminder,
}

impl TemplateKind {
    /// Template identifier understood by the notification service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BookingCreated => "booking_created",
            Self::PaymentReceived => "payment_received",
            Self::AppointmentReminder => "appointment_reminder",
        }
    }
}

/// Template variables describing an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentNotice {
    pub appointment: Uuid,
    pub service_type: Uuid,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub status: &'static str,
}

impl From<&AppointmentRecord> for AppointmentNotice {
    fn from(appointment: &AppointmentRecord) -> Self {
        Self {
            appointment: appointment.uuid.into_uuid(),
            service_type: appointment.service_type_uuid.into_uuid(),
            start_at: appointment.start_at,
            end_at: appointment.end_at,
            status: appointment.status.as_str(),
        }
    }
}

/// Delayed task that calls back into reminder delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTask {
    /// Appointment to remind about.
    pub appointment: AppointmentUuid,
}
