//! Notification Dispatcher

use std::{fmt, sync::Arc};

use tokio::task::JoinHandle;
use tracing::{Instrument, info, warn};

use crate::{
    database::Db,
    domain::{
        appointments::records::AppointmentRecord,
        subscriptions::repository::PgSubscriptionsRepository,
    },
    notifications::{AppointmentNotice, Notifier, TemplateKind},
};

/// Delivers appointment events to every subscribed address.
///
/// Dispatch runs after the triggering write has committed. Failures are
/// logged and never surface to the caller.
#[derive(Clone)]
pub struct NotificationDispatcher {
    db: Db,
    notifier: Arc<dyn Notifier>,
    repository: PgSubscriptionsRepository,
}

impl fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl NotificationDispatcher {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            notifier,
            repository: PgSubscriptionsRepository::new(),
        }
    }

    /// Admins hear about new bookings and payments, not reminders.
    fn includes_admins(template: TemplateKind) -> bool {
        !matches!(template, TemplateKind::AppointmentReminder)
    }

    async fn recipients(
        &self,
        appointment: &AppointmentRecord,
        template: TemplateKind,
    ) -> Result<Vec<String>, sqlx::Error> {
        let mut tx = self.db.begin_transaction().await?;

        let subscriptions = self
            .repository
            .list_recipients(
                &mut tx,
                appointment.customer_uuid,
                Self::includes_admins(template),
            )
            .await?;

        tx.commit().await?;

        let mut addresses: Vec<String> = subscriptions
            .into_iter()
            .map(|subscription| subscription.address)
            .collect();

        addresses.sort_unstable();
        addresses.dedup();

        Ok(addresses)
    }

    /// Send `template` about `appointment` to each recipient. Returns the
    /// number of successful deliveries.
    pub async fn dispatch(&self, appointment: &AppointmentRecord, template: TemplateKind) -> usize {
        let addresses = match self.recipients(appointment, template).await {
            Ok(addresses) => addresses,
            Err(error) => {
                warn!(
                    appointment_uuid = %appointment.uuid,
                    template = template.as_str(),
                    error = %error,
                    "failed to resolve notification recipients"
                );

                return 0;
            }
        };

        let notice = AppointmentNotice::from(appointment);
        let mut delivered = 0;

        for address in &addresses {
            match self.notifier.notify(address, template, notice.clone()).await {
                Ok(()) => delivered += 1,
                Err(error) => warn!(
                    appointment_uuid = %appointment.uuid,
                    template = template.as_str(),
                    error = %error,
                    "failed to deliver notification"
                ),
            }
        }

        info!(
            appointment_uuid = %appointment.uuid,
            template = template.as_str(),
            recipients = addresses.len(),
            delivered,
            "dispatched notification"
        );

        delivered
    }

    /// [`dispatch`](Self::dispatch) on a background task, so the caller does
    /// not wait on the notification service.
    pub fn dispatch_detached(
        &self,
        appointment: AppointmentRecord,
        template: TemplateKind,
    ) -> JoinHandle<usize> {
        let dispatcher = self.clone();

        tokio::spawn(
            async move { dispatcher.dispatch(&appointment, template).await }.in_current_span(),
        )
    }
}
