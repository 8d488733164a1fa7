//! Appointments service errors.

use salon::status::{AppointmentStatus, TransitionError};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// `SQLSTATE` raised when an exclusion constraint rejects a row.
pub(crate) const EXCLUSION_VIOLATION: &str = "23P01";

#[derive(Debug, Error)]
pub enum AppointmentsServiceError {
    #[error("appointment already exists")]
    AlreadyExists,

    #[error("appointment not found")]
    NotFound,

    #[error("not allowed to access this appointment")]
    Forbidden,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("the requested time is no longer available")]
    SlotUnavailable,

    #[error("cannot move appointment from {from} to {to}")]
    IllegalTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AppointmentsServiceError {
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

impl From<TransitionError> for AppointmentsServiceError {
    fn from(error: TransitionError) -> Self {
        match error {
            TransitionError::Illegal { from, to } => Self::IllegalTransition { from, to },
            TransitionError::NotPermitted { .. } => Self::Forbidden,
        }
    }
}

/// Whether `error` is the overlap exclusion constraint firing.
pub(crate) fn is_exclusion_violation(error: &Error) -> bool {
    error
        .as_database_error()
        .and_then(DatabaseError::code)
        .is_some_and(|code| code == EXCLUSION_VIOLATION)
}
