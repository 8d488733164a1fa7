//! Cancel Appointment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    appointments::{errors::into_status_error, models::AppointmentResponse},
    extensions::*,
    state::State,
};

/// Cancel Appointment Handler
///
/// Cancels a booked or paid appointment, freeing its slot.
#[endpoint(
    tags("appointments"),
    summary = "Cancel Appointment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Appointment canceled"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the caller's appointment"),
        (status_code = StatusCode::NOT_FOUND, description = "Appointment not found"),
        (status_code = StatusCode::CONFLICT, description = "Appointment cannot be canceled"),
    ),
)]
pub(crate) async fn handler(
    appointment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AppointmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let customer = principal.customer;

    let appointment = state
        .app
        .appointments
        .cancel(principal, appointment.into_inner().into())
        .await
        .map_err(into_status_error)?;

    info!(appointment = %appointment.uuid, by = %customer, "appointment canceled");

    Ok(Json(appointment.into()))
}
