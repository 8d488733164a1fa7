//! Delete Blocked Date Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use crate::{availability::errors::into_status_error, extensions::*, state::State};

/// Delete Blocked Date Handler
///
/// Reopens a blocked date.
#[endpoint(
    tags("blocked-dates"),
    summary = "Unblock Date",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Block removed"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator access required"),
        (status_code = StatusCode::NOT_FOUND, description = "Date is not blocked"),
    ),
)]
pub(crate) async fn handler(
    date: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let date = date.into_inner().to_date_or_400("date")?;

    state
        .app
        .availability
        .delete_blocked_date(date)
        .await
        .map_err(into_status_error)?;

    info!(%date, "date unblocked");

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
