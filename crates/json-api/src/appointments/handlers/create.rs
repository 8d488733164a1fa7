//! Create Appointment Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use salon_app::domain::bookings::data::NewBooking;

use crate::{
    appointments::{
        errors::booking_status_error,
        models::{AppointmentResponse, CheckoutResponse},
    },
    extensions::*,
    state::State,
};

/// Create Appointment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAppointmentRequest {
    /// Service to book
    pub service_type: Uuid,

    /// Requested start, RFC 3339 with offset
    pub start_at: String,

    pub notes: Option<String>,

    /// Customer to book for; administrators only
    pub customer: Option<Uuid>,
}

/// Appointment Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppointmentCreatedResponse {
    pub appointment: AppointmentResponse,

    /// Deposit checkout page
    pub checkout_url: Option<String>,

    /// Why the deposit checkout could not be opened
    pub payment_error: Option<String>,
}

/// Create Appointment Handler
///
/// Reserves a slot and opens the deposit checkout. A failed checkout is
/// reported in the body; the reservation is kept.
#[endpoint(
    tags("appointments"),
    summary = "Book Appointment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Appointment booked"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Cannot book for this customer"),
        (status_code = StatusCode::CONFLICT, description = "Slot no longer available"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAppointmentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AppointmentCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let booking = NewBooking {
        service_type: request.service_type.into(),
        start_at: request.start_at.to_timestamp_or_400("start_at")?,
        notes: request.notes,
        customer: request.customer.map(Into::into),
    };

    let booking = state
        .app
        .bookings
        .book(principal, booking, Timestamp::now())
        .await
        .map_err(booking_status_error)?;

    let uuid = booking.appointment.uuid;

    if let Some(reason) = booking.checkout.error() {
        warn!(appointment = %uuid, "booked without checkout: {reason}");
    } else {
        info!(appointment = %uuid, "appointment booked");
    }

    res.add_header(LOCATION, format!("/appointments/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    let checkout = CheckoutResponse::from(booking.checkout);

    Ok(Json(AppointmentCreatedResponse {
        appointment: booking.appointment.into(),
        checkout_url: checkout.checkout_url,
        payment_error: checkout.payment_error,
    }))
}
