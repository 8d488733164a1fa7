//! Reminders service.

use async_trait::async_trait;
use mockall::automock;
use salon::status::AppointmentStatus;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        appointments::{records::AppointmentUuid, repository::PgAppointmentsRepository},
        reminders::errors::RemindersServiceError,
        subscriptions::NotificationDispatcher,
    },
    notifications::TemplateKind,
};

/// Outcome of a fired reminder task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderDelivery {
    /// The reminder was dispatched.
    Delivered,

    /// The appointment is no longer paid; nothing was sent.
    Skipped,
}

impl ReminderDelivery {
    #[must_use]
    pub const fn delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

#[derive(Debug, Clone)]
pub struct PgRemindersService {
    db: Db,
    appointments: PgAppointmentsRepository,
    dispatcher: NotificationDispatcher,
}

impl PgRemindersService {
    #[must_use]
    pub fn new(db: Db, dispatcher: NotificationDispatcher) -> Self {
        Self {
            db,
            appointments: PgAppointmentsRepository::new(),
            dispatcher,
        }
    }
}

#[async_trait]
impl RemindersService for PgRemindersService {
    #[tracing::instrument(
        name = "reminders.service.deliver_reminder",
        skip(self),
        fields(appointment_uuid = %appointment),
        err
    )]
    async fn deliver_reminder(
        &self,
        appointment: AppointmentUuid,
    ) -> Result<ReminderDelivery, RemindersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.appointments.get_appointment(&mut tx, appointment).await?;

        tx.commit().await?;

        if record.status != AppointmentStatus::Paid {
            info!(status = %record.status, "skipping stale reminder");

            return Ok(ReminderDelivery::Skipped);
        }

        self.dispatcher
            .dispatch(&record, TemplateKind::AppointmentReminder)
            .await;

        Ok(ReminderDelivery::Delivered)
    }
}

#[automock]
#[async_trait]
pub trait RemindersService: Send + Sync {
    /// Sends the reminder for `appointment` if it is still paid.
    async fn deliver_reminder(
        &self,
        appointment: AppointmentUuid,
    ) -> Result<ReminderDelivery, RemindersServiceError>;
}
