//! Get Availability Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    availability::{errors::into_status_error, models::WindowResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailabilityResponse {
    pub date: String,

    /// Windows on the date, ordered by start
    pub windows: Vec<WindowResponse>,
}

/// Get Availability Handler
///
/// Returns the working windows configured for a date.
#[endpoint(
    tags("availability"),
    summary = "Get Availability",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    date: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<AvailabilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.principal_or_401()?;

    let date = date.into_inner().to_date_or_400("date")?;

    let windows = state
        .app
        .availability
        .list_windows(date)
        .await
        .map_err(into_status_error)?;

    Ok(Json(AvailabilityResponse {
        date: date.to_string(),
        windows: windows.into_iter().map(Into::into).collect(),
    }))
}
