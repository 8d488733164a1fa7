//! Get Appointment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    appointments::{errors::into_status_error, models::AppointmentResponse},
    extensions::*,
    state::State,
};

/// Get Appointment Handler
///
/// Returns an appointment owned by the caller, or any appointment for
/// administrators.
#[endpoint(
    tags("appointments"),
    summary = "Get Appointment",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    appointment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AppointmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let appointment = state
        .app
        .appointments
        .get_appointment(principal, appointment.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(appointment.into()))
}
