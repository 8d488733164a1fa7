//! Payment Webhook Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use salon_app::domain::appointments::data::PaymentConfirmation;

use crate::{
    appointments::{errors::into_status_error, models::AppointmentResponse},
    extensions::*,
    state::State,
};

pub(crate) const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Compares in time independent of where the inputs first differ. An empty
/// secret never matches.
fn secret_matches(presented: &str, expected: &str) -> bool {
    !expected.is_empty() && bool::from(presented.as_bytes().ct_eq(expected.as_bytes()))
}

/// Payment Settled Event
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentSettledRequest {
    /// Reference returned when the checkout was opened
    pub payment_reference: String,

    /// Amount settled, in minor currency units
    pub amount_paid: u64,
}

impl From<PaymentSettledRequest> for PaymentConfirmation {
    fn from(request: PaymentSettledRequest) -> Self {
        Self {
            payment_reference: request.payment_reference,
            amount_paid: request.amount_paid,
        }
    }
}

/// Payment Webhook Handler
///
/// Marks the appointment behind a settled checkout as paid. Redelivery of a
/// settlement already applied returns the appointment unchanged.
#[endpoint(
    tags("payments"),
    summary = "Payment Settled Webhook",
    responses(
        (status_code = StatusCode::OK, description = "Payment applied"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or wrong webhook secret"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown payment reference"),
        (status_code = StatusCode::CONFLICT, description = "Appointment cannot be paid"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<PaymentSettledRequest>,
    depot: &mut Depot,
) -> Result<Json<AppointmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let secret = req.header::<String>(WEBHOOK_SECRET_HEADER).unwrap_or_default();

    if !secret_matches(&secret, &state.webhook_secret) {
        warn!("payment webhook rejected: bad secret");

        return Err(StatusError::unauthorized().brief("Invalid webhook secret"));
    }

    let confirmation = PaymentConfirmation::from(json.into_inner());
    let reference = confirmation.payment_reference.clone();

    let appointment = state
        .app
        .appointments
        .confirm_payment(confirmation, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    info!(appointment = %appointment.uuid, payment_reference = %reference, "payment applied");

    Ok(Json(appointment.into()))
}
