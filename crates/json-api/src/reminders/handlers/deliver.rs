//! Deliver Reminder Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, reminders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReminderDeliveryResponse {
    /// Whether a reminder went out; `false` when the appointment is no
    /// longer paid
    pub delivered: bool,
}

/// Deliver Reminder Handler
///
/// Called by the notification service's delayed task when a reminder is due.
#[endpoint(
    tags("reminders"),
    summary = "Deliver Reminder",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    appointment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReminderDeliveryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let delivery = state
        .app
        .reminders
        .deliver_reminder(appointment.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReminderDeliveryResponse {
        delivered: delivery.delivered(),
    }))
}
