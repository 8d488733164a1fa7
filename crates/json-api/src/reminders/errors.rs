//! Reminder Errors

use salvo::http::StatusError;
use tracing::error;

use salon_app::domain::reminders::RemindersServiceError;

pub(crate) fn into_status_error(error: RemindersServiceError) -> StatusError {
    match error {
        RemindersServiceError::NotFound => StatusError::not_found().brief("Appointment not found"),
        RemindersServiceError::Sql(source) => {
            error!("failed to deliver reminder: {source}");

            StatusError::internal_server_error()
        }
    }
}
