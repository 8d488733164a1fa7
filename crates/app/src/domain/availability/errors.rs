//! Availability service errors.

use salon::{
    blocks::BlockedDateError, intervals::TimeRangeError, windows::AvailabilityWindowError,
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvailabilityServiceError {
    #[error("blocked date already exists")]
    AlreadyExists,

    #[error("blocked date not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("{field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("could not resolve date in salon time zone")]
    TimeZone(#[from] jiff::Error),

    #[error("stored window is invalid")]
    InvalidWindow(#[from] InvalidWindowError),

    #[error("stored blocked date is invalid")]
    InvalidBlock(#[from] BlockedDateError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AvailabilityServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
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

/// A persisted window that does not satisfy the engine's invariants.
#[derive(Debug, Error)]
pub enum InvalidWindowError {
    #[error(transparent)]
    Range(#[from] TimeRangeError),

    #[error(transparent)]
    Window(#[from] AvailabilityWindowError),
}
