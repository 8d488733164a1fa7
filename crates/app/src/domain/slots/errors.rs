//! Slots service errors.

use salon::{
    blocks::BlockedDateError, intervals::TimeRangeError, services::ServiceTypeError,
    slots::SlotError,
};
use sqlx::Error;
use thiserror::Error;

use crate::domain::availability::errors::InvalidWindowError;

#[derive(Debug, Error)]
pub enum SlotsServiceError {
    #[error("service type not found")]
    ServiceTypeNotFound,

    #[error("could not resolve date in salon time zone")]
    TimeZone(#[from] jiff::Error),

    #[error("stored window is invalid")]
    InvalidWindow(#[from] InvalidWindowError),

    #[error("stored blocked date is invalid")]
    InvalidBlock(#[from] BlockedDateError),

    #[error("stored service type is invalid")]
    InvalidServiceType(#[from] ServiceTypeError),

    #[error("stored appointment is invalid")]
    InvalidAppointment(#[from] TimeRangeError),

    #[error("slot generation failed")]
    Generation(#[from] SlotError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SlotsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::ServiceTypeNotFound,
            error => Self::Sql(error),
        }
    }
}
