//! Slot Errors

use salvo::http::StatusError;
use tracing::error;

use salon_app::domain::slots::SlotsServiceError;

pub(crate) fn into_status_error(error: SlotsServiceError) -> StatusError {
    match error {
        SlotsServiceError::ServiceTypeNotFound => {
            StatusError::not_found().brief("Service type not found")
        }
        SlotsServiceError::Sql(source) => {
            error!("failed to load availability: {source}");

            StatusError::internal_server_error()
        }
        error @ (SlotsServiceError::TimeZone(_)
        | SlotsServiceError::InvalidWindow(_)
        | SlotsServiceError::InvalidBlock(_)
        | SlotsServiceError::InvalidServiceType(_)
        | SlotsServiceError::InvalidAppointment(_)
        | SlotsServiceError::Generation(_)) => {
            error!("failed to generate slots: {error}");

            StatusError::internal_server_error()
        }
    }
}
