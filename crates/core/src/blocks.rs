//! Blocked Dates
//!
//! Days (or parts of days) on which no slot may be offered, regardless of the
//! windows configured for them.

use jiff::{
    civil::{Date, Time},
    tz::TimeZone,
};
use thiserror::Error;

use crate::intervals::{TimeRange, TimeRangeError};

/// Errors raised when constructing or resolving a [`BlockedDate`].
#[derive(Debug, Error)]
pub enum BlockedDateError {
    /// Partial blocks need a non-empty sub-range.
    #[error("partial block must end after it starts ({start} >= {end})")]
    EmptyRange {
        /// Requested start time.
        start: Time,

        /// Requested end time.
        end: Time,
    },

    /// Resolving the wall-clock range in the salon time zone failed.
    #[error("could not resolve blocked range in time zone: {0}")]
    TimeZone(#[from] jiff::Error),

    /// The resolved instants did not form a valid range.
    #[error(transparent)]
    Range(#[from] TimeRangeError),
}

/// How much of the date is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Nothing can be booked on the date.
    FullDay,

    /// Only `[start, end)` wall-clock time is blocked.
    Partial {
        /// First blocked wall-clock time.
        start: Time,

        /// First wall-clock time after the block.
        end: Time,
    },
}

/// A blocked calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedDate {
    date: Date,
    kind: BlockKind,
}

impl BlockedDate {
    /// Block an entire date.
    pub fn full_day(date: Date) -> Self {
        Self {
            date,
            kind: BlockKind::FullDay,
        }
    }

    /// Block part of a date.
    ///
    /// # Errors
    ///
    /// Returns [`BlockedDateError::EmptyRange`] when `start >= end`.
    pub fn partial(date: Date, start: Time, end: Time) -> Result<Self, BlockedDateError> {
        if start >= end {
            return Err(BlockedDateError::EmptyRange { start, end });
        }

        Ok(Self {
            date,
            kind: BlockKind::Partial { start, end },
        })
    }

    /// Blocked date.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Extent of the block.
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Whether the whole date is blocked.
    pub fn is_full_day(&self) -> bool {
        matches!(self.kind, BlockKind::FullDay)
    }

    /// Absolute range covered by a partial block in `tz`; `None` for full days.
    ///
    /// # Errors
    ///
    /// Returns an error when the wall-clock bounds cannot be resolved in `tz`.
    pub fn partial_range(&self, tz: &TimeZone) -> Result<Option<TimeRange>, BlockedDateError> {
        let BlockKind::Partial { start, end } = self.kind else {
            return Ok(None);
        };

        let start = self.date.to_datetime(start).to_zoned(tz.clone())?;
        let end = self.date.to_datetime(end).to_zoned(tz.clone())?;

        Ok(Some(TimeRange::new(start.timestamp(), end.timestamp())?))
    }
}
