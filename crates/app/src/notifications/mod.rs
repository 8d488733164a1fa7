//! Notifications
//!
//! Push, email and SMS delivery plus delayed-task scheduling are provided by
//! an external notification service.

mod client;
mod errors;
mod models;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

pub use client::{HttpNotifier, HttpNotifierConfig};
pub use errors::NotifierError;
pub use models::{AppointmentNotice, ReminderTask, TemplateKind};

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a templated message to one recipient address.
    async fn notify(
        &self,
        recipient: &str,
        template: TemplateKind,
        payload: AppointmentNotice,
    ) -> Result<(), NotifierError>;

    /// Ask the notification service to run `task` at `deliver_at`.
    async fn schedule_delayed(
        &self,
        task: ReminderTask,
        deliver_at: Timestamp,
    ) -> Result<(), NotifierError>;
}
