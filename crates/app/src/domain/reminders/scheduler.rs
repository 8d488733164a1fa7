//! Reminder Scheduler

use std::{fmt, sync::Arc};

use jiff::Timestamp;
use salon::reminders::ReminderPolicy;
use tracing::{info, warn};

use crate::{
    domain::appointments::records::AppointmentRecord,
    notifications::{Notifier, ReminderTask},
};

/// Hands reminder tasks to the notification service's delayed queue.
#[derive(Clone)]
pub struct ReminderScheduler {
    policy: ReminderPolicy,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for ReminderScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReminderScheduler")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ReminderScheduler {
    #[must_use]
    pub fn new(policy: ReminderPolicy, notifier: Arc<dyn Notifier>) -> Self {
        Self { policy, notifier }
    }

    /// Schedule the reminder for `appointment`. Returns the delivery instant
    /// when the task was accepted.
    pub async fn schedule(
        &self,
        appointment: &AppointmentRecord,
        now: Timestamp,
    ) -> Option<Timestamp> {
        let deliver_at = self.policy.deliver_at(appointment.start_at, now);
        let task = ReminderTask {
            appointment: appointment.uuid,
        };

        match self.notifier.schedule_delayed(task, deliver_at).await {
            Ok(()) => {
                info!(
                    appointment_uuid = %appointment.uuid,
                    deliver_at = %deliver_at,
                    "scheduled appointment reminder"
                );

                Some(deliver_at)
            }
            Err(error) => {
                warn!(
                    appointment_uuid = %appointment.uuid,
                    error = %error,
                    "failed to schedule appointment reminder"
                );

                None
            }
        }
    }
}
