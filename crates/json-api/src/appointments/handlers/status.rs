//! Appointment Status Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use salon::status::AppointmentStatus;

use crate::{
    appointments::{errors::into_status_error, models::AppointmentResponse},
    extensions::*,
    state::State,
};

/// Status Change Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusChangeRequest {
    /// Target status: `booked`, `paid`, `completed` or `canceled`
    pub status: String,
}

/// Appointment Status Handler
///
/// Administrative status change, including reactivating a canceled
/// appointment when its time is still free.
#[endpoint(
    tags("appointments"),
    summary = "Change Appointment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator access required"),
        (status_code = StatusCode::CONFLICT, description = "Illegal transition or slot taken"),
    ),
)]
pub(crate) async fn handler(
    appointment: PathParam<Uuid>,
    json: JsonBody<StatusChangeRequest>,
    depot: &mut Depot,
) -> Result<Json<AppointmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.admin_or_403()?;

    let to = json
        .into_inner()
        .status
        .parse::<AppointmentStatus>()
        .or_400("status: expected one of booked, paid, completed, canceled")?;

    let appointment = state
        .app
        .appointments
        .transition(principal, appointment.into_inner().into(), to, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    info!(appointment = %appointment.uuid, status = %to, "appointment status changed");

    Ok(Json(appointment.into()))
}
