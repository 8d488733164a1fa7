//! Retry Checkout Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    appointments::{errors::booking_status_error, models::CheckoutResponse},
    extensions::*,
    state::State,
};

/// Retry Checkout Handler
///
/// Opens a fresh deposit checkout for an appointment still awaiting payment.
#[endpoint(
    tags("appointments"),
    summary = "Retry Deposit Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checkout outcome"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the caller's appointment"),
        (status_code = StatusCode::NOT_FOUND, description = "Appointment not found"),
        (status_code = StatusCode::CONFLICT, description = "Appointment is not awaiting payment"),
    ),
)]
pub(crate) async fn handler(
    appointment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let checkout = state
        .app
        .bookings
        .retry_checkout(principal, appointment.into_inner().into(), Timestamp::now())
        .await
        .map_err(booking_status_error)?;

    Ok(Json(checkout.into()))
}
