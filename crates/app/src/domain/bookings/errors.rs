//! Bookings service errors.

use salon::status::AppointmentStatus;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::appointments::errors::is_exclusion_violation;

#[derive(Debug, Error)]
pub enum BookingsServiceError {
    #[error("{field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("service type not found")]
    ServiceTypeNotFound,

    #[error("the requested time is no longer available")]
    SlotUnavailable,

    #[error("not allowed to book for this customer")]
    Forbidden,

    #[error("appointment not found")]
    NotFound,

    #[error("appointment is {status}, not awaiting payment")]
    NotAwaitingPayment { status: AppointmentStatus },

    #[error("appointment already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BookingsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if is_exclusion_violation(&error) {
            return Self::SlotUnavailable;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
