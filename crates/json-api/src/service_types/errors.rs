//! Service Type Errors

use salvo::http::StatusError;
use tracing::error;

use salon_app::domain::service_types::ServiceTypesServiceError;

pub(crate) fn into_status_error(error: ServiceTypesServiceError) -> StatusError {
    match error {
        ServiceTypesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Service type already exists")
        }
        ServiceTypesServiceError::NotFound => StatusError::not_found(),
        ServiceTypesServiceError::InvalidReference
        | ServiceTypesServiceError::MissingRequiredData
        | ServiceTypesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid service type payload")
        }
        ServiceTypesServiceError::Sql(source) => {
            error!("failed to load service types: {source}");

            StatusError::internal_server_error()
        }
    }
}
