//! Availability Errors

use salvo::http::StatusError;
use tracing::error;

use salon_app::domain::availability::AvailabilityServiceError;

pub(crate) fn into_status_error(error: AvailabilityServiceError) -> StatusError {
    match error {
        error @ AvailabilityServiceError::InvalidField { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        AvailabilityServiceError::AlreadyExists => {
            StatusError::conflict().brief("Date is already blocked")
        }
        AvailabilityServiceError::NotFound => StatusError::not_found().brief("Date is not blocked"),
        AvailabilityServiceError::InvalidReference => {
            StatusError::bad_request().brief("service_types: unknown service type")
        }
        AvailabilityServiceError::MissingRequiredData | AvailabilityServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid availability payload")
        }
        AvailabilityServiceError::Sql(source) => {
            error!("failed to update availability: {source}");

            StatusError::internal_server_error()
        }
        error @ (AvailabilityServiceError::TimeZone(_)
        | AvailabilityServiceError::InvalidWindow(_)
        | AvailabilityServiceError::InvalidBlock(_)) => {
            error!("failed to read availability: {error}");

            StatusError::internal_server_error()
        }
    }
}
