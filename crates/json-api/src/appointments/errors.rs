//! Appointment Errors

use salvo::http::StatusError;
use tracing::error;

use salon_app::domain::{appointments::AppointmentsServiceError, bookings::BookingsServiceError};

const SLOT_UNAVAILABLE: &str = "The requested time is no longer available";

pub(crate) fn into_status_error(error: AppointmentsServiceError) -> StatusError {
    match error {
        AppointmentsServiceError::NotFound => StatusError::not_found().brief("Appointment not found"),
        AppointmentsServiceError::Forbidden => StatusError::forbidden(),
        AppointmentsServiceError::SlotUnavailable => StatusError::conflict().brief(SLOT_UNAVAILABLE),
        error @ AppointmentsServiceError::IllegalTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        AppointmentsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Appointment already exists")
        }
        AppointmentsServiceError::InvalidReference
        | AppointmentsServiceError::MissingRequiredData
        | AppointmentsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid appointment payload")
        }
        AppointmentsServiceError::Sql(source) => {
            error!("failed to update appointment: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn booking_status_error(error: BookingsServiceError) -> StatusError {
    match error {
        error @ BookingsServiceError::InvalidField { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        BookingsServiceError::ServiceTypeNotFound => {
            StatusError::bad_request().brief("service_type: unknown or inactive service")
        }
        BookingsServiceError::SlotUnavailable => StatusError::conflict().brief(SLOT_UNAVAILABLE),
        BookingsServiceError::Forbidden => StatusError::forbidden(),
        BookingsServiceError::NotFound => StatusError::not_found().brief("Appointment not found"),
        error @ BookingsServiceError::NotAwaitingPayment { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        BookingsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Appointment already exists")
        }
        BookingsServiceError::InvalidReference
        | BookingsServiceError::MissingRequiredData
        | BookingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid booking payload")
        }
        BookingsServiceError::Sql(source) => {
            error!("failed to book appointment: {source}");

            StatusError::internal_server_error()
        }
    }
}
