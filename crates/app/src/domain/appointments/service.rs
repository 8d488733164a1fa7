//! Appointments service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use salon::status::{Actor, AppointmentStatus, Effects, TransitionError, transition};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        appointments::{
            data::PaymentConfirmation,
            errors::AppointmentsServiceError,
            records::{AppointmentRecord, AppointmentUuid},
            repository::PgAppointmentsRepository,
        },
        reminders::ReminderScheduler,
        subscriptions::NotificationDispatcher,
    },
    identity::Principal,
    notifications::TemplateKind,
    settings::SalonSettings,
};

#[derive(Debug, Clone)]
pub struct PgAppointmentsService {
    db: Db,
    settings: SalonSettings,
    repository: PgAppointmentsRepository,
    dispatcher: NotificationDispatcher,
    reminders: ReminderScheduler,
}

impl PgAppointmentsService {
    #[must_use]
    pub fn new(
        db: Db,
        settings: SalonSettings,
        dispatcher: NotificationDispatcher,
        reminders: ReminderScheduler,
    ) -> Self {
        Self {
            db,
            settings,
            repository: PgAppointmentsRepository::new(),
            dispatcher,
            reminders,
        }
    }

    /// Perform the side effects a committed transition owes.
    async fn apply_effects(
        &self,
        appointment: &AppointmentRecord,
        effects: Effects,
        now: Timestamp,
    ) {
        if effects.notify_payment_received {
            self.dispatcher
                .dispatch(appointment, TemplateKind::PaymentReceived)
                .await;
        }

        if effects.schedule_reminder {
            self.reminders.schedule(appointment, now).await;
        }
    }
}

#[async_trait]
impl AppointmentsService for PgAppointmentsService {
    async fn get_appointment(
        &self,
        principal: Principal,
        appointment: AppointmentUuid,
    ) -> Result<AppointmentRecord, AppointmentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.get_appointment(&mut tx, appointment).await?;

        tx.commit().await?;

        if !principal.can_access(record.customer_uuid) {
            return Err(AppointmentsServiceError::Forbidden);
        }

        Ok(record)
    }

    #[tracing::instrument(
        name = "appointments.service.cancel",
        skip(self, principal),
        fields(appointment_uuid = %appointment, customer_uuid = %principal.customer),
        err
    )]
    async fn cancel(
        &self,
        principal: Principal,
        appointment: AppointmentUuid,
    ) -> Result<AppointmentRecord, AppointmentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .repository
            .get_appointment_for_update(&mut tx, appointment)
            .await?;

        if !principal.can_access(current.customer_uuid) {
            return Err(AppointmentsServiceError::Forbidden);
        }

        transition(current.status, AppointmentStatus::Canceled, principal.actor())?;

        let updated = self
            .repository
            .update_status(&mut tx, appointment, AppointmentStatus::Canceled)
            .await?;

        tx.commit().await?;

        info!(from = %current.status, "canceled appointment");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "appointments.service.confirm_payment",
        skip(self, confirmation),
        fields(
            payment_reference = %confirmation.payment_reference,
            amount_paid = confirmation.amount_paid,
            appointment_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn confirm_payment(
        &self,
        confirmation: PaymentConfirmation,
        now: Timestamp,
    ) -> Result<AppointmentRecord, AppointmentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .repository
            .find_by_payment_reference(&mut tx, &confirmation.payment_reference)
            .await?;

        tracing::Span::current().record(
            "appointment_uuid",
            tracing::field::display(current.uuid),
        );

        if current.status == AppointmentStatus::Paid {
            tx.commit().await?;

            info!("ignoring repeated payment confirmation");

            return Ok(current);
        }

        let effects = transition(
            current.status,
            AppointmentStatus::Paid,
            Actor::PaymentProcessor,
        )
        .map_err(|error| match error {
            TransitionError::Illegal { from, to }
            | TransitionError::NotPermitted { from, to, .. } => {
                AppointmentsServiceError::IllegalTransition { from, to }
            }
        })?;

        let updated = self
            .repository
            .record_payment(&mut tx, current.uuid, confirmation.amount_paid)
            .await?;

        tx.commit().await?;

        info!("recorded payment");

        self.apply_effects(&updated, effects, now).await;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "appointments.service.transition",
        skip(self, principal),
        fields(appointment_uuid = %appointment, to = %to),
        err
    )]
    async fn transition(
        &self,
        principal: Principal,
        appointment: AppointmentUuid,
        to: AppointmentStatus,
        now: Timestamp,
    ) -> Result<AppointmentRecord, AppointmentsServiceError> {
        if !principal.is_admin {
            return Err(AppointmentsServiceError::Forbidden);
        }

        let mut tx = self
            .db
            .begin_resource_transaction(self.settings.resource.into_uuid())
            .await?;

        let current = self
            .repository
            .get_appointment_for_update(&mut tx, appointment)
            .await?;

        let effects = transition(current.status, to, Actor::Administrator)?;

        if effects.recheck_overlap
            && self
                .repository
                .overlap_exists(
                    &mut tx,
                    current.resource_uuid,
                    current.start_at,
                    current.end_at,
                    Some(current.uuid),
                )
                .await?
        {
            return Err(AppointmentsServiceError::SlotUnavailable);
        }

        let updated = self
            .repository
            .update_status(&mut tx, appointment, to)
            .await?;

        tx.commit().await?;

        info!(from = %current.status, "transitioned appointment");

        self.apply_effects(&updated, effects, now).await;

        Ok(updated)
    }

    #[tracing::instrument(name = "appointments.service.complete_elapsed", skip(self), err)]
    async fn complete_elapsed(
        &self,
        now: Timestamp,
    ) -> Result<Vec<AppointmentRecord>, AppointmentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let elapsed = self
            .repository
            .list_elapsed_paid(&mut tx, self.settings.resource, now)
            .await?;

        let mut completed = Vec::with_capacity(elapsed.len());

        for appointment in elapsed {
            transition(
                appointment.status,
                AppointmentStatus::Completed,
                Actor::Scheduler,
            )?;

            completed.push(
                self.repository
                    .update_status(&mut tx, appointment.uuid, AppointmentStatus::Completed)
                    .await?,
            );
        }

        tx.commit().await?;

        info!(count = completed.len(), "completed elapsed appointments");

        Ok(completed)
    }
}

#[automock]
#[async_trait]
pub trait AppointmentsService: Send + Sync {
    /// Retrieves an appointment the caller owns, or any appointment for admins.
    async fn get_appointment(
        &self,
        principal: Principal,
        appointment: AppointmentUuid,
    ) -> Result<AppointmentRecord, AppointmentsServiceError>;

    /// Cancels an appointment, freeing its slot. Canceled appointments are kept.
    async fn cancel(
        &self,
        principal: Principal,
        appointment: AppointmentUuid,
    ) -> Result<AppointmentRecord, AppointmentsServiceError>;

    /// Applies a payment processor settlement. Repeated confirmations for an
    /// already paid appointment return it unchanged.
    async fn confirm_payment(
        &self,
        confirmation: PaymentConfirmation,
        now: Timestamp,
    ) -> Result<AppointmentRecord, AppointmentsServiceError>;

    /// Administrative status change: completion, manual payment or
    /// reactivation of a canceled appointment.
    async fn transition(
        &self,
        principal: Principal,
        appointment: AppointmentUuid,
        to: AppointmentStatus,
        now: Timestamp,
    ) -> Result<AppointmentRecord, AppointmentsServiceError>;

    /// Marks paid appointments that ended at or before `now` as completed.
    async fn complete_elapsed(
        &self,
        now: Timestamp,
    ) -> Result<Vec<AppointmentRecord>, AppointmentsServiceError>;
}
