//! Calendar value parsing for request fields.

use jiff::{
    Timestamp,
    civil::{Date, Time},
};
use salvo::prelude::StatusError;

use crate::extensions::*;

/// Parse request strings into calendar values, rejecting bad input with a
/// `field: reason` brief.
pub(crate) trait CalendarExt {
    fn to_date_or_400(&self, field: &str) -> Result<Date, StatusError>;

    fn to_time_or_400(&self, field: &str) -> Result<Time, StatusError>;

    fn to_timestamp_or_400(&self, field: &str) -> Result<Timestamp, StatusError>;
}

impl CalendarExt for str {
    fn to_date_or_400(&self, field: &str) -> Result<Date, StatusError> {
        self.parse::<Date>()
            .or_400(&format!("{field}: expected a YYYY-MM-DD date"))
    }

    fn to_time_or_400(&self, field: &str) -> Result<Time, StatusError> {
        self.parse::<Time>()
            .or_400(&format!("{field}: expected an HH:MM time"))
    }

    fn to_timestamp_or_400(&self, field: &str) -> Result<Timestamp, StatusError> {
        self.parse::<Timestamp>()
            .or_400(&format!("{field}: expected an RFC 3339 timestamp with offset"))
    }
}
