//! Subscription Errors

use salvo::http::StatusError;
use tracing::error;

use salon_app::domain::subscriptions::SubscriptionsServiceError;

pub(crate) fn into_status_error(error: SubscriptionsServiceError) -> StatusError {
    match error {
        SubscriptionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Address is already subscribed")
        }
        SubscriptionsServiceError::NotFound => StatusError::not_found(),
        SubscriptionsServiceError::InvalidReference
        | SubscriptionsServiceError::MissingRequiredData
        | SubscriptionsServiceError::InvalidData => {
            StatusError::bad_request().brief("address: must not be blank")
        }
        SubscriptionsServiceError::Sql(source) => {
            error!("failed to register subscription: {source}");

            StatusError::internal_server_error()
        }
    }
}
