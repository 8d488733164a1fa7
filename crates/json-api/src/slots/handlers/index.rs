//! Slot Index Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salon::slots::Slot;

use crate::{extensions::*, slots::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SlotResponse {
    /// When the service would start
    pub start_at: String,

    /// When the service would end
    pub end_at: String,

    /// Availability window the slot belongs to
    pub window_uuid: Uuid,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        Self {
            start_at: slot.start().to_string(),
            end_at: slot.end().to_string(),
            window_uuid: slot.window(),
        }
    }
}

/// Slot Index Handler
///
/// Returns the start times still bookable for a service on a date.
#[endpoint(
    tags("slots"),
    summary = "List Available Slots",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Bookable slots"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Service type not found"),
    ),
)]
pub(crate) async fn handler(
    date: QueryParam<String, true>,
    service_type: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<Vec<SlotResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.principal_or_401()?;

    let date = date.into_inner().to_date_or_400("date")?;

    let slots = state
        .app
        .slots
        .available_slots(date, service_type.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(slots.into_iter().map(Into::into).collect()))
}
